use crate::domain::state::{Position, Projectile};
use crate::domain::systems::mover::{Step, step_toward};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct LaunchConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub margin: f32,
}

/// Picks where a new throw enters: left or right edge, random height.
pub fn launch_origin<R: Rng + ?Sized>(rng: &mut R, cfg: LaunchConfig) -> Position {
    let x = if rng.gen_bool(0.5) {
        -cfg.margin
    } else {
        cfg.screen_width + cfg.margin
    };
    let y = if cfg.screen_height > 0.0 {
        rng.gen_range(0.0..cfg.screen_height)
    } else {
        0.0
    };
    Position::new(x, y)
}

/// Puts a parked projectile in flight from `origin`. No-op while one is already flying.
pub fn launch(p: &mut Projectile, origin: Position) -> bool {
    if p.moving {
        return false;
    }
    p.body.position = origin;
    p.moving = true;
    true
}

pub fn park(p: &mut Projectile) {
    p.body.position = p.rest;
    p.moving = false;
}

/// Advances an in-flight projectile one frame.
///
/// Returns true only on the frame it reaches the target; the projectile is
/// parked on that same frame, so later calls return false until relaunched.
pub fn advance(p: &mut Projectile) -> bool {
    if !p.moving {
        return false;
    }

    match step_toward(p.body.position, p.target, p.speed) {
        Step::Advanced(next) => {
            p.body.position = next;
            false
        }
        Step::Arrived(_) => {
            park(p);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::test_support::test_state;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn launch_cfg() -> LaunchConfig {
        LaunchConfig {
            screen_width: 1280.0,
            screen_height: 720.0,
            margin: 50.0,
        }
    }

    #[test]
    fn when_launched_then_origin_is_off_screen_on_either_side() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_left = false;
        let mut saw_right = false;

        for _ in 0..200 {
            let origin = launch_origin(&mut rng, launch_cfg());
            match origin.x {
                x if x == -50.0 => saw_left = true,
                x if x == 1330.0 => saw_right = true,
                x => panic!("unexpected launch x {x}"),
            }
            assert!((0.0..720.0).contains(&origin.y));
        }

        assert!(saw_left && saw_right);
    }

    #[test]
    fn when_in_flight_then_launch_is_rejected() {
        let mut state = test_state();
        let p = &mut state.projectile;

        assert!(launch(p, Position::new(-50.0, 100.0)));
        assert!(!launch(p, Position::new(1330.0, 500.0)));
        assert_eq!(p.body.position, Position::new(-50.0, 100.0));
    }

    #[test]
    fn when_target_reached_then_impact_is_reported_once_and_projectile_parks() {
        let mut state = test_state();
        let p = &mut state.projectile;
        launch(p, Position::new(-50.0, 360.0));

        let mut impacts = 0;
        let mut frames = 0;
        while p.moving {
            if advance(p) {
                impacts += 1;
            }
            frames += 1;
            assert!(frames < 1000, "projectile never arrived");
        }

        // 690 px at 20 px per frame: 34 full steps, then the snap.
        assert_eq!(frames, 35);
        assert_eq!(impacts, 1);
        assert_eq!(p.body.position, p.rest);
        assert!(!advance(p));
    }

    #[test]
    fn when_parked_then_advance_does_nothing() {
        let mut state = test_state();
        let p = &mut state.projectile;

        assert!(!advance(p));
        assert_eq!(p.body.position, p.rest);
    }
}

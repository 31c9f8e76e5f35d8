// Shared primitives for one-time overlay bootstrapping across integration tests.
use pinata_overlay::OverlaySettings;
use std::{
    io::{Read, Write},
    net::TcpStream,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const CANDY_BYTES: &[u8] = b"\x89PNG candy";

// Global base address ("host:port") used by all tests after the overlay publishes it.
static SERVER_ADDR: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test overlay is running and return its "host:port".
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_addr = Arc::new(OnceLock::<String>::new());
        let published_addr_thread = Arc::clone(&published_addr);
        let assets_dir = write_test_assets();
        let scratch_dir = assets_dir.clone();

        // Spawn an OS thread so the overlay outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_addr_thread.set(addr.to_string());

                let settings = OverlaySettings {
                    assets_dir,
                    // No chat in tests; throws are exercised at the unit level.
                    chat: None,
                    ..OverlaySettings::from_env()
                };
                pinata_overlay::run(listener, settings)
                    .await
                    .expect("overlay failed");
            });
        });

        wait_for_server_addr_and_readiness(published_addr);
        // Assets are held in memory once the overlay serves them.
        let _ = std::fs::remove_dir_all(scratch_dir);
    });

    SERVER_ADDR
        .get()
        .expect("server addr should be initialized")
        .as_str()
}

// Write a throwaway asset directory with every sprite plus the impact sound.
fn write_test_assets() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pinata-overlay-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create asset dir");
    for (name, bytes) in [
        ("candy.png", CANDY_BYTES),
        ("front.png", b"front".as_slice()),
        ("back.png", b"back".as_slice()),
        ("projectile.png", b"lemon".as_slice()),
        ("nya.wav", b"RIFF".as_slice()),
    ] {
        std::fs::write(dir.join(name), bytes).expect("write asset");
    }
    dir
}

fn wait_for_server_addr_and_readiness(published_addr: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published_addr.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_ADDR.set(addr.clone());

    // Retry for a short period until the overlay answers an asset request,
    // which only happens after startup loaded every asset.
    for _ in 0..100 {
        if serves_assets(&addr) {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

fn serves_assets(addr: &str) -> bool {
    let Ok(mut stream) = TcpStream::connect(addr) else {
        return false;
    };
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let request = format!(
        "GET /assets/candy.png HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    );
    if stream.write_all(request.as_bytes()).is_err() {
        return false;
    }
    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response);
    response.starts_with(b"HTTP/1.1 200")
}

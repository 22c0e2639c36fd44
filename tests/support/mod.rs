// One-time server bootstrapping shared by the integration tests in a binary.
use session_server::ServerConfig;
use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const INDEX_HTML: &str = "<!doctype html><title>AR mapper</title>";

// Base URL and storage root published once the server is accepting.
static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    pub root: PathBuf,
}

impl TestServer {
    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("data").join("sessions")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("data").join("logs")
    }
}

// Ensure the test server is running and return its handle.
pub fn ensure_server() -> &'static TestServer {
    SERVER.get_or_init(|| {
        let root = std::env::temp_dir()
            .join(format!("session_server_it_{}", uuid::Uuid::new_v4()));
        let static_dir = root.join("public");
        std::fs::create_dir_all(&static_dir).expect("create static dir");
        std::fs::write(static_dir.join("index.html"), INDEX_HTML).expect("write index.html");

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir,
            sessions_dir: root.join("data").join("sessions"),
            logs_dir: root.join("data").join("logs"),
            ..ServerConfig::default()
        };

        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // An OS thread keeps the server alive across individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port avoids collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                session_server::run(listener, config).await.expect("server failed");
            });
        });

        let base_url = wait_for_server_url_and_readiness(published_url);
        TestServer { base_url, root }
    })
}

// Wait for URL publication and then for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) -> String {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return base_url;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DisplayPoint {
    date: String,
    label: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct WeekView {
    week: u32,
    is_loading: bool,
    month_label: String,
    display_year: i32,
    can_go_back: bool,
    can_go_forward: bool,
    points: Vec<DisplayPoint>,
}

/// Contacts per day written into the data file before the server starts.
const CONTACTS_PER_DAY: &[(&str, usize)] = &[("2024-01-02", 3), ("2024-01-10", 1)];

fn write_contact_log(days: &[(&str, usize)]) -> PathBuf {
    let contacts: Vec<_> = days
        .iter()
        .flat_map(|(date, count)| {
            (0..*count).map(move |minute| json!({ "timestamp": format!("{date}T09:{minute:02}:00") }))
        })
        .collect();

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "contact_dashboard_{}_{}.json",
        std::process::id(),
        nanos
    ));
    let payload = json!({ "stats": [], "contacts": contacts });
    std::fs::write(&path, serde_json::to_vec_pretty(&payload).unwrap()).expect("write contact log");
    path
}

struct Dashboard {
    base_url: String,
    client: Client,
    process: Child,
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

impl Dashboard {
    async fn start() -> Self {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("reserve a local port")
            .port();

        let process = Command::new(env!("CARGO_BIN_EXE_contact_dashboard"))
            .env("PORT", port.to_string())
            .env("APP_DATA_PATH", write_contact_log(CONTACTS_PER_DAY))
            .env("ANCHOR_DATE", "2024-01-02")
            .env("QUERY_STYLE", "range")
            .env("RUST_LOG", "info")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to spawn dashboard");

        #[cfg(unix)]
        kill_on_exit::register(process.id());

        let dashboard = Dashboard {
            base_url: format!("http://127.0.0.1:{port}"),
            client: Client::new(),
            process,
        };
        dashboard.wait_until_serving().await;
        dashboard
    }

    async fn wait_until_serving(&self) {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/api/week")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            sleep(Duration::from_millis(100)).await;
        }
        panic!("dashboard did not start serving");
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn navigate(&self, direction: &str) -> WeekView {
        self.client
            .post(self.url(&format!("/api/week/{direction}")))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn load(&self, week: u32) -> reqwest::Response {
        self.client
            .post(self.url("/api/week/load"))
            .json(&json!({ "week": week }))
            .send()
            .await
            .unwrap()
    }

    async fn page(&self) -> String {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

#[cfg(unix)]
mod kill_on_exit {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(terminate);
            }
        });
    }

    extern "C" fn terminate() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

// One server for the whole file; tests take the lock because they move the shared week pointer.
static DASHBOARD: Lazy<Mutex<Option<Arc<Dashboard>>>> = Lazy::new(|| Mutex::new(None));
static WEEK_POINTER: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

async fn dashboard() -> Arc<Dashboard> {
    let mut slot = DASHBOARD.lock().await;
    match slot.as_ref() {
        Some(dashboard) => Arc::clone(dashboard),
        None => {
            let dashboard = Arc::new(Dashboard::start().await);
            *slot = Some(Arc::clone(&dashboard));
            dashboard
        }
    }
}

#[tokio::test]
async fn http_week_one_counts_per_day() {
    let _pointer = WEEK_POINTER.lock().await;
    let dashboard = dashboard().await;

    let view: WeekView = dashboard.load(1).await.json().await.unwrap();

    assert_eq!(view.week, 1);
    assert!(!view.is_loading);
    assert_eq!(view.month_label, "January");
    assert_eq!(view.display_year, 2024);
    assert!(!view.can_go_back);
    assert!(view.can_go_forward);
    assert_eq!(view.points.len(), 7);
    assert_eq!(view.points[0].date, "2024-01-02");
    assert_eq!(view.points[0].label, "01/02");
    assert_eq!(view.points[0].count, 3);
    assert!(view.points[1..].iter().all(|point| point.count == 0));
}

#[tokio::test]
async fn http_navigation_pages_by_week() {
    let _pointer = WEEK_POINTER.lock().await;
    let dashboard = dashboard().await;
    dashboard.load(1).await;

    assert_eq!(dashboard.navigate("prev").await.week, 1);

    let next = dashboard.navigate("next").await;
    assert_eq!(next.week, 2);
    assert!(next.can_go_back);
    assert_eq!(next.points[0].date, "2024-01-09");
    assert_eq!(next.points[1].count, 1);

    let back = dashboard.navigate("prev").await;
    assert_eq!(back.week, 1);
    assert_eq!(back.points[0].count, 3);
}

#[tokio::test]
async fn http_rejects_weeks_outside_calendar() {
    let _pointer = WEEK_POINTER.lock().await;
    let dashboard = dashboard().await;
    dashboard.load(3).await;

    assert_eq!(dashboard.load(0).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dashboard.load(u32::MAX).await.status(), StatusCode::BAD_REQUEST);

    let view = dashboard.navigate("next").await;
    assert_eq!(view.week, 4);
    assert!(!view.is_loading);
}

#[tokio::test]
async fn http_index_shows_current_week() {
    let _pointer = WEEK_POINTER.lock().await;
    let dashboard = dashboard().await;
    dashboard.load(5).await;

    let html = dashboard.page().await;
    assert!(html.contains("Week 5"));
    assert!(html.contains("January - February 2024"));
}

pub mod calculate;
pub mod results;
pub mod upload;

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        excel::test_workbook,
        model::result::NewResult,
        routes::{self, Limiters},
        store::{Store, memory::MemoryStore},
    };
    use actix_web::{App, http::StatusCode, test, web::Data};
    use calamine::{Reader, open_workbook_auto_from_rs};
    use serde_json::Value;
    use std::io::Cursor;
    use std::net::SocketAddr;
    use std::sync::Arc;

    const BOUNDARY: &str = "sicalc-test-boundary";

    macro_rules! app {
        ($store:expr, $config:expr, $limiters:expr) => {{
            let config: Config = $config;
            let limiters: Limiters = $limiters;
            let store: Arc<dyn Store> = $store.clone();
            test::init_service(
                App::new()
                    .app_data(Data::from(store))
                    .app_data(Data::new(config.clone()))
                    .configure(|cfg| routes::configure(cfg, &config, &limiters)),
            )
            .await
        }};
        ($store:expr, $config:expr) => {{
            let config: Config = $config;
            app!($store, config.clone(), Limiters::new(&config))
        }};
        ($store:expr) => {
            app!($store, Config::for_tests())
        };
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn upload(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> test::TestRequest {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        test::TestRequest::post()
            .uri(uri)
            .peer_addr(peer())
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn post(uri: &str) -> test::TestRequest {
        test::TestRequest::post().uri(uri).peer_addr(peer())
    }

    fn get(uri: &str) -> test::TestRequest {
        test::TestRequest::get().uri(uri).peer_addr(peer())
    }

    fn cities_xlsx() -> Vec<u8> {
        test_workbook(&[
            &["城市名", "年份", "基数下限", "基数上限", "缴纳比例"],
            &["佛山", "2024", "1500", "5000", "0.1"],
            &["广州", "2024", "2300", "30000", "0.2"],
        ])
    }

    fn salaries_xlsx() -> Vec<u8> {
        test_workbook(&[
            &["employee_id", "employee_name", "month", "salary_amount"],
            &["1", "A", "202401", "1000"],
            &["1", "A", "202402", "3000"],
            &["2", "B", "202401", "1000"],
            &["3", "C", "202401", "9000"],
        ])
    }

    #[actix_web::test]
    async fn upload_calculate_and_list() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let req = upload("/api/upload/cities", "file", "cities.xlsx", &cities_xlsx()).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["count"], 2);

        let req = upload("/api/upload/salaries", "file", "salaries.xls", &salaries_xlsx()).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["count"], 4);

        let req = post("/api/calculate").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["count"], 3);

        let req = get("/api/results").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        let data = resp["data"].as_array().unwrap();
        let rows: Vec<(&str, f64, f64, f64)> = data
            .iter()
            .map(|r| {
                (
                    r["employee_name"].as_str().unwrap(),
                    r["avg_salary"].as_f64().unwrap(),
                    r["contribution_base"].as_f64().unwrap(),
                    r["company_fee"].as_f64().unwrap(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("A", 2000.0, 2000.0, 200.0),
                ("B", 1000.0, 1500.0, 150.0),
                ("C", 9000.0, 5000.0, 500.0),
            ]
        );
    }

    #[actix_web::test]
    async fn calculate_uses_requested_city() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        test::call_service(&app, upload("/api/upload/cities", "file", "c.xlsx", &cities_xlsx()).to_request()).await;
        test::call_service(&app, upload("/api/upload/salaries", "file", "s.xlsx", &salaries_xlsx()).to_request()).await;

        let req = post("/api/calculate?city=%E5%B9%BF%E5%B7%9E").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        let b = &resp["results"][1];
        assert_eq!(b["employee_name"], "B");
        assert_eq!(b["contribution_base"], 2300.0);
        assert_eq!(b["company_fee"], 460.0);
    }

    #[actix_web::test]
    async fn unknown_city_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::for_tests();
        config.default_city = "深圳".to_string();
        let app = app!(store, config);

        test::call_service(&app, upload("/api/upload/cities", "file", "c.xlsx", &cities_xlsx()).to_request()).await;
        test::call_service(&app, upload("/api/upload/salaries", "file", "s.xlsx", &salaries_xlsx()).to_request()).await;

        let resp = test::call_service(&app, post("/api/calculate").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "no city standard found for 深圳");
    }

    #[actix_web::test]
    async fn calculate_without_salaries_keeps_previous_results() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_results(&[NewResult {
                employee_name: "old".to_string(),
                avg_salary: 1.0,
                contribution_base: 1.0,
                company_fee: 1.0,
            }])
            .await
            .unwrap();
        let app = app!(store);

        let resp = test::call_service(&app, post("/api/calculate").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("no salary data"));

        let results = store.select_results().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].employee_name, "old");
    }

    #[actix_web::test]
    async fn calculating_twice_gives_the_same_results() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        test::call_service(&app, upload("/api/upload/cities", "file", "c.xlsx", &cities_xlsx()).to_request()).await;
        test::call_service(&app, upload("/api/upload/salaries", "file", "s.xlsx", &salaries_xlsx()).to_request()).await;

        let first: Value = test::call_and_read_body_json(&app, post("/api/calculate").to_request()).await;
        let second: Value = test::call_and_read_body_json(&app, post("/api/calculate").to_request()).await;

        assert_eq!(first["results"], second["results"]);
        assert_eq!(store.select_results().await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn text_nan_salary_counts_as_zero() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let salaries = test_workbook(&[
            &["employee_name", "salary_amount"],
            &["A", "NaN"],
        ]);
        test::call_service(&app, upload("/api/upload/cities", "file", "c.xlsx", &cities_xlsx()).to_request()).await;
        test::call_service(&app, upload("/api/upload/salaries", "file", "s.xlsx", &salaries).to_request()).await;

        let resp: Value = test::call_and_read_body_json(&app, post("/api/calculate").to_request()).await;

        let a = &resp["results"][0];
        assert_eq!(a["avg_salary"], 0.0);
        assert_eq!(a["contribution_base"], 1500.0);
        assert_eq!(a["company_fee"], 150.0);
    }

    #[actix_web::test]
    async fn rate_limits_are_shared_between_workers() {
        let mut config = Config::for_tests();
        config.rate_api_per_min = 1;
        let limiters = Limiters::new(&config);
        let first_worker = app!(Arc::new(MemoryStore::new()), config.clone(), limiters.clone());
        let second_worker = app!(Arc::new(MemoryStore::new()), config.clone(), limiters.clone());

        let resp = test::call_service(&first_worker, get("/api/results").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&second_worker, get("/api/results").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn upload_rejects_non_excel_files() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let req = upload("/api/upload/salaries", "file", "salaries.csv", b"a,b\n1,2").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.select_salaries().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn upload_requires_the_file_field() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let req = upload("/api/upload/cities", "attachment", "cities.xlsx", &cities_xlsx()).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("no file uploaded"));
    }

    #[actix_web::test]
    async fn upload_over_the_limit_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::for_tests();
        config.max_upload_bytes = 64;
        let app = app!(store, config);

        let req = upload("/api/upload/cities", "file", "cities.xlsx", &cities_xlsx()).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.select_cities().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unreadable_workbook_is_a_server_error() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let req = upload("/api/upload/cities", "file", "cities.xlsx", b"not a workbook").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn export_needs_results() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        let resp = test::call_service(&app, get("/api/results/export").to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn export_returns_a_workbook_attachment() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(store);

        test::call_service(&app, upload("/api/upload/cities", "file", "c.xlsx", &cities_xlsx()).to_request()).await;
        test::call_service(&app, upload("/api/upload/salaries", "file", "s.xlsx", &salaries_xlsx()).to_request()).await;
        test::call_service(&app, post("/api/calculate").to_request()).await;

        let resp = test::call_service(&app, get("/api/results/export").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("filename*=UTF-8''"));

        let body = test::read_body(resp).await;
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(body.to_vec())).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.height(), 4);
    }
}

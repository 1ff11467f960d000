use recipe_browser::controllers::DetailController;
use recipe_browser::BrowseConfig;

const LOCAL_RECIPES: &str = r#"[
    {
        "id": "52772",
        "title": "Teriyaki Chicken Casserole",
        "category": "Chicken",
        "area": "Japanese",
        "instructions": "STEP 1 - Preheat\r\nPreheat oven to 350F.\r\nCombine soy sauce and water.",
        "ingredients": [
            {"ingredient": "soy sauce", "measure": "3/4 cup"},
            "sesame seeds",
            {"ingredient": "", "measure": "1 cup"}
        ],
        "image": "assets/images/teriyaki.png"
    }
]"#;

fn write_temp_recipes(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "recipe-browser-detail-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, body).unwrap();
    path
}

#[tokio::test]
async fn test_api_404_shows_not_found_without_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/52772")
        .with_status(404)
        .create_async()
        .await;

    // The local file knows the id, but an explicit 404 must never reach it
    let path = write_temp_recipes("404-no-fallback", LOCAL_RECIPES);
    let config = BrowseConfig {
        api_url: server.url(),
        local_data_path: path.to_string_lossy().into_owned(),
        ..BrowseConfig::default()
    };

    let controller = DetailController::new(&config).unwrap();
    let page = controller.render_page("52772", None).await;

    assert!(page.contains("Recipe not found"));
    assert!(!page.contains("Teriyaki Chicken Casserole"));

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_api_500_falls_back_to_local_file() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/52772")
        .with_status(500)
        .create_async()
        .await;

    let path = write_temp_recipes("500-fallback", LOCAL_RECIPES);
    let config = BrowseConfig {
        api_url: server.url(),
        local_data_path: path.to_string_lossy().into_owned(),
        ..BrowseConfig::default()
    };

    let controller = DetailController::new(&config).unwrap();
    let page = controller.render_page("52772", None).await;

    assert!(page.contains("Teriyaki Chicken Casserole"));
    assert!(page.contains("<strong>STEP 1 - Preheat</strong>"));
    // The blank-named ingredient is dropped
    assert_eq!(page.matches("<li>").count(), 2);

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_both_paths_failing_shows_generic_error() {
    let config = BrowseConfig {
        api_url: "http://127.0.0.1:1".to_string(),
        timeout_ms: 200,
        local_data_path: "/nonexistent/recipes.json".to_string(),
        ..BrowseConfig::default()
    };

    let controller = DetailController::new(&config).unwrap();
    let page = controller.render_page("52772", None).await;

    assert!(page.contains("Unable to load recipe. Please try again later."));
}

#[tokio::test]
async fn test_carried_keyword_highlights_across_fields() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/52772")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": "52772",
                "title": "Chicken Teriyaki",
                "category": "Chicken",
                "area": "Japanese",
                "instructions": "Slice the chicken thinly.",
                "ingredients": [{"ingredient": "chicken thighs", "measure": "500g"}],
                "image": null
            }"#,
        )
        .create_async()
        .await;

    let config = BrowseConfig {
        api_url: server.url(),
        ..BrowseConfig::default()
    };
    let controller = DetailController::new(&config).unwrap();
    let page = controller.render_page("52772", Some("chicken")).await;

    assert!(page.contains("<h1><mark>Chicken</mark> Teriyaki</h1>"));
    assert!(page.contains("<strong>Category:</strong> <mark>Chicken</mark>"));
    assert!(page.contains("<mark>chicken</mark> thighs"));
    assert!(page.contains("Slice the <mark>chicken</mark> thinly."));
}

#[tokio::test]
async fn test_local_scan_misses_unknown_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/99999")
        .with_status(500)
        .create_async()
        .await;

    let path = write_temp_recipes("unknown-id", LOCAL_RECIPES);
    let config = BrowseConfig {
        api_url: server.url(),
        local_data_path: path.to_string_lossy().into_owned(),
        ..BrowseConfig::default()
    };

    let controller = DetailController::new(&config).unwrap();
    let page = controller.render_page("99999", None).await;

    assert!(page.contains("Recipe not found"));

    std::fs::remove_file(path).ok();
}

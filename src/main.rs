use std::env;

use recipe_browser::{browse, recipe_page, BrowseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = BrowseConfig::load()?;
    let args: Vec<String> = env::args().collect();

    match args.get(1) {
        // With a recipe id (and optional search keyword) print the detail page
        Some(id) => {
            let keyword = args.get(2).map(String::as_str);
            println!("{}", recipe_page(&config, id, keyword).await?);
        }
        // Otherwise print the listing page
        None => {
            println!("{}", browse(&config).await?);
        }
    }

    Ok(())
}

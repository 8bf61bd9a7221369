use clap::Parser;
use reqwest::header::ORIGIN;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Query a running catalog proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Resource to search (e.g. people, planets)
    resource: String,

    #[arg(short, long, default_value = "")]
    search: String,

    #[arg(short, long, default_value = "1")]
    page: String,

    /// Field to sort the page by
    #[arg(long)]
    sort_by: Option<String>,

    /// `desc` for descending; anything else sorts ascending
    #[arg(long)]
    order: Option<String>,

    /// Send an Origin header, as a browser would
    #[arg(long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut params = vec![("search", cli.search.as_str()), ("page", cli.page.as_str())];
    if let Some(sort_by) = cli.sort_by.as_deref() {
        params.push(("sortBy", sort_by));
    }
    if let Some(order) = cli.order.as_deref() {
        params.push(("order", order));
    }

    let mut request = client
        .get(format!("{}/api/{}", cli.url.trim_end_matches('/'), cli.resource))
        .query(&params);
    if let Some(origin) = cli.origin.as_deref() {
        request = request.header(ORIGIN, origin);
    }

    let res = request.send().await?;
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

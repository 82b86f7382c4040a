use airnet::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Usage: web_server [port] [static_dir]
    let args: Vec<String> = env::args().collect();
    let port = args
        .get(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3005);

    let config = ServerConfig {
        port,
        static_dir: args.get(2).cloned(),
        ..Default::default()
    };

    println!("🔧 Starting Airnet Web Server...");
    println!("⚙️  Configuration:");
    println!("   📡 Port: {}", config.port);
    println!("   📁 Static files: {}", config.static_dir.as_deref().unwrap_or("(none)"));
    println!("   🌐 CORS enabled: {}", config.enable_cors);
    println!("   👥 Max sessions: {}", config.max_sessions);
    println!();

    start_server_with_config(config).await?;

    Ok(())
}

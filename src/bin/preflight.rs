use school_directory::infra::config::{self, DbConfig};
use school_directory::{MySqlSchoolStore, SchoolStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-table]\n\
         \n\
         Requires env vars:\n\
           DB_HOST, DB_USER, DB_PASSWORD, DB_NAME\n\
         Optional:\n\
           DB_PORT (default 3306), BIND_ADDR (default 0.0.0.0:3000)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_table = args.iter().any(|a| a == "--create-table");

    // Force-read config (nice error messages if missing)
    let db = DbConfig::from_env()?;
    info!(host = %db.host, port = db.port, database = %db.database, user = %db.user, "preflight");
    info!(bind_addr = %config::bind_addr(), "server address");

    let store = MySqlSchoolStore::new(&db);

    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("MySQL is not reachable: {}", e))?;
    info!("MySQL reachable");

    if create_table {
        store.ensure_schema().await?;
        info!("schools table ensured");
    }

    match store.list_schools().await {
        Ok(rows) => {
            let with_image = rows
                .iter()
                .filter(|r| school_directory::domain::image::decode(r.image.as_deref()).is_some())
                .count();
            info!(
                rows = rows.len(),
                with_image,
                "schools table readable"
            );
        }
        Err(e) => {
            store.close().await;
            warn!("schools table is not readable; re-run with --create-table if it does not exist");
            return Err(anyhow::anyhow!("schools table check failed: {}", e));
        }
    }

    store.close().await;
    info!("preflight OK");
    Ok(())
}

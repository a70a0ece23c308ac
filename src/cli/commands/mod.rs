mod catalog;
mod movie;
mod series;

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::db::Store;

pub use catalog::{cmd_decades, cmd_genres, cmd_health};
pub use movie::cmd_movie;
pub use series::cmd_series;

async fn open_store(config: &Config) -> anyhow::Result<Arc<Store>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(Arc::new(store))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

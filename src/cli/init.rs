use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{data_dir_overridden, db_path, save_settings, Settings};

pub fn run(data_dir: Option<String>, scheme: Option<String>) -> Result<()> {
    // With STRATA_DATA_DIR in force the settings file is never consulted,
    // so scripted runs do not touch the user's config.
    if !data_dir_overridden() {
        let mut settings = Settings::default();
        if let Some(dir) = data_dir {
            settings.data_dir = dir;
        }
        if let Some(name) = scheme {
            settings.scheme_name = name;
        }
        save_settings(&settings)?;
    }

    let path = db_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = get_connection(&path)?;
    init_db(&conn)?;

    println!("Initialized strata database at {}", path.display());
    Ok(())
}

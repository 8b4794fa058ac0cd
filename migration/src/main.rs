use std::{env, fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let url = if db_path.starts_with("sqlite:") {
        db_path.clone()
    } else {
        format!("sqlite://{}?mode=rwc", db_path)
    };
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        _ => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        match fs::remove_file(db_path) {
            Ok(()) => println!("Deleted DB: {}", db_path.display()),
            Err(e) => eprintln!("Failed to delete DB {}: {}", db_path.display(), e),
        }
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }

    // Generated exercises, slide decks and uploaded materials
    let media_root = config::media_root();
    let media_path = Path::new(&media_root);
    if media_path.exists() {
        match fs::remove_dir_all(media_path) {
            Ok(()) => println!("Deleted media files: {}", media_path.display()),
            Err(e) => eprintln!("Failed to delete media files {}: {}", media_path.display(), e),
        }
    } else {
        println!("Media storage does not exist: {}", media_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create DB directory {}: {}", parent.display(), e);
        }
    }
}

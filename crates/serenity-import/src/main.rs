//! Educational resource import binary.

use tracing::{error, info};

use serenity_firestore::ConnectionRegistry;
use serenity_import::{logging, report, ImportConfig};

#[tokio::main]
async fn main() {
    // gcp_auth and reqwest both pull in rustls; pin the provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Load environment variables
    dotenvy::dotenv().ok();

    logging::init_tracing();

    info!("Starting serenity-import");

    let config = ImportConfig::from_env();
    info!("Import config: {:?}", config);

    let mut registry = ConnectionRegistry::from_env();

    match serenity_import::run(&config, &mut registry).await {
        Ok(summary) => {
            report(&summary);
            info!("Import process completed");
        }
        Err(e) => {
            error!("Import aborted: {}", e);
            if e.is_missing_credential() {
                eprintln!("To get a service account key:");
                eprintln!("  1. Firebase Console -> Project Settings -> Service Accounts");
                eprintln!("  2. Click 'Generate new private key'");
                eprintln!("  3. Save it as serviceAccountKey.json in firebase_setup/");
                eprintln!("     or point GOOGLE_APPLICATION_CREDENTIALS at it");
            }
            std::process::exit(1);
        }
    }
}

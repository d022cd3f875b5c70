use brainys_sdk::{Auth, ClientError};
use dotenvy::dotenv;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();
    common::init_tracing();

    let email = std::env::var("BRAINYS_EMAIL").expect("BRAINYS_EMAIL must be set");
    let password = std::env::var("BRAINYS_PASSWORD").expect("BRAINYS_PASSWORD must be set");

    let session = common::session();
    let auth = Auth::new(session.clone());

    match auth.login(&email, &password).await {
        Ok(user) => {
            let balance = session.credit_balance();
            println!(
                "Signed in as {} ({}), {} of {} credits left on {}",
                user.name,
                user.initials(),
                balance.credit,
                balance.limit,
                balance.package_name
            );
        }
        Err(ClientError::OtpRequired(message)) => {
            println!("{message}. A new code was sent to {email}.");
        }
        Err(error) => eprintln!("Login failed: {error}"),
    }
}

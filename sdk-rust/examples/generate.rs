use brainys_sdk::{
    brainys_test::RecordingObserver, Generator, SyllabusForm, TracingBrowser,
};
use dotenvy::dotenv;
use std::sync::Arc;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();
    common::init_tracing();

    let session = common::session();
    session.require_token().expect("run the login example first");

    let generator = Generator::new(session, Arc::new(TracingBrowser));
    let charge = generator
        .credit_charge(brainys_sdk::ModuleType::Syllabus)
        .await
        .unwrap();
    println!("Generating a syllabus costs {charge} credits");

    let observer = RecordingObserver::new();
    let artifact = generator
        .submit(
            &SyllabusForm {
                name: "Silabus IPA Kelas 7".to_string(),
                grade: "fase_d".to_string(),
                subject: "IPA".to_string(),
                notes: "Fokus pada praktikum sederhana".to_string(),
            },
            &observer,
        )
        .await
        .unwrap();

    println!("Artifact id: {:?}", artifact.id);
    println!("{}", artifact.to_json_string().unwrap());
}

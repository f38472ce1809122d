//! Basic example demonstrating the App Store Connect API client.
//!
//! Run with:
//! ```
//! ASC_API_TOKEN=your-jwt cargo run --example basic
//! ```

use ascapi::{
    get_app_for_beta_license_agreement, get_submission_for_app_store_version, App, AscClient,
    BetaLicenseAgreement, Get, GetBetaLicenseAgreementQuery, List,
    ListBetaLicenseAgreementsQuery, Page,
};

#[tokio::main]
async fn main() -> ascapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating App Store Connect client...");
    let client = AscClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of agreements, sideloading their apps
    println!("\n--- Listing Beta License Agreements (first page) ---");
    let query = ListBetaLicenseAgreementsQuery {
        include: vec!["app".to_string()],
        fields_apps: vec!["name".to_string(), "bundleId".to_string()],
        limit: Some(10),
        ..Default::default()
    };
    let response = BetaLicenseAgreement::list_page(&client, &query, None).await?;
    if let Some(limit) = response.rate_limit() {
        println!("Rate limit: {:?} of {:?} remaining", limit.remaining, limit.limit);
    }

    let document = response.into_body();
    let apps = document.included_of::<App>()?;
    let page = Page::from(document);
    println!(
        "Found {} agreements (total: {:?}, more: {})",
        page.len(),
        page.total,
        page.has_more
    );

    for agreement in &page {
        let app_name = agreement
            .app_id()
            .and_then(|id| apps.iter().find(|app| app.id == id))
            .and_then(|app| app.name())
            .unwrap_or("unknown app");
        println!("  - {} ({})", agreement.id, app_name);
    }

    // Get a specific agreement (using the first one from the list)
    if let Some(first) = page.items.first() {
        println!("\n--- Getting Agreement Details ---");
        let agreement = BetaLicenseAgreement::get(
            &client,
            &first.id,
            &GetBetaLicenseAgreementQuery::default(),
        )
        .await?
        .into_body()
        .data;
        println!("Agreement: {}", agreement.id);
        println!("  Text: {}", agreement.agreement_text().unwrap_or("(empty)"));

        // Follow the relationship to its app
        println!("\n--- App via Agreement ---");
        let app = get_app_for_beta_license_agreement(&client, &agreement.id, &Default::default())
            .await?
            .into_body()
            .data;
        println!("  Name: {}", app.name().unwrap_or("unknown"));
        println!("  Bundle ID: {}", app.bundle_id().unwrap_or("unknown"));
    }

    // Check whether a version is in review, if one was given
    if let Ok(version_id) = std::env::var("ASC_VERSION_ID") {
        println!("\n--- Submission Status ---");
        match get_submission_for_app_store_version(&client, &version_id, &Default::default())
            .await
        {
            Ok(response) => println!("  Submitted as {}", response.body.data.id),
            Err(e) if e.is_not_found() => println!("  Version {version_id} is not submitted"),
            Err(e) => return Err(e),
        }
    }

    println!("\nDone!");
    Ok(())
}

use async_trait::async_trait;
use pobeda_backend::app::app::App;
use pobeda_backend::client::{
    CalculatorField, FormError, FormStatus, HttpTransport, LeadForm, QuoteField, TransportError,
};
use pobeda_backend::config::AppConfig;
use pobeda_backend::model::EmailContent;
use pobeda_backend::util::email::{EmailDispatcher, EmailError};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockDispatcher {
    sent: Mutex<Vec<EmailContent>>,
    fail: bool,
}

#[async_trait]
impl EmailDispatcher for MockDispatcher {
    async fn dispatch(&self, content: &EmailContent) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(content.clone());
        if self.fail {
            Err(EmailError::NotConfigured("no smtp".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Serve the app on an ephemeral port and return the mail endpoint URL
async fn spawn_server(dispatcher: Arc<dyn EmailDispatcher>) -> String {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").with_test_writer().try_init();
    let config = AppConfig::from_lookup(|_| None);
    let router = App::with_dispatcher(config, dispatcher).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/mail", addr)
}

#[tokio::test]
async fn test_calculator_form_round_trip() {
    let dispatcher = Arc::new(MockDispatcher::default());
    let transport = HttpTransport::new(spawn_server(dispatcher.clone()).await);

    let mut form = LeadForm::calculator();
    form.update(CalculatorField::SquareMeters, "150").unwrap();
    form.update(CalculatorField::Email, "a@b.com").unwrap();
    form.update(CalculatorField::Phone, "123").unwrap();

    form.submit(&transport).await.unwrap();
    assert_eq!(form.status(), &FormStatus::Submitted);

    let sent = dispatcher.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Cost Calculation Request - Pobeda LLC");
    assert_eq!(
        sent[0].text,
        "New Cost Calculation Request - Pobeda LLC\n\nSquare Meters: 150\nEmail: a@b.com\nPhone: 123"
    );
}

#[tokio::test]
async fn test_site_visit_form_round_trip() {
    let dispatcher = Arc::new(MockDispatcher::default());
    let transport = HttpTransport::new(spawn_server(dispatcher.clone()).await);

    let mut form = LeadForm::site_visit();
    form.update_named("fullName", "Jane Doe").unwrap();
    form.update_named("phone", "+971500000000").unwrap();
    form.update_named("propertyType", "Villa").unwrap();
    form.submit(&transport).await.unwrap();

    let sent = dispatcher.sent.lock().unwrap();
    assert_eq!(sent[0].subject, "New Free Site Visit Request - Pobeda LLC");
    assert!(sent[0].text.contains("Property Type: Villa"));
}

#[tokio::test]
async fn test_full_quote_form_round_trip() {
    let dispatcher = Arc::new(MockDispatcher::default());
    let transport = HttpTransport::new(spawn_server(dispatcher.clone()).await);

    let mut form = LeadForm::quote();
    form.update(QuoteField::FullName, "Ivan Petrov").unwrap();
    form.update(QuoteField::Phone, "+971501112233").unwrap();
    form.update(QuoteField::Email, "ivan@example.com").unwrap();
    form.update(QuoteField::WorkRequired, "Full villa renovation").unwrap();
    form.submit(&transport).await.unwrap();

    let sent = dispatcher.sent.lock().unwrap();
    assert_eq!(sent[0].subject, "New Project Quote Request - Pobeda LLC");
    assert!(sent[0].text.ends_with("Work Required: Full villa renovation"));
}

#[tokio::test]
async fn test_dispatch_failure_leaves_form_retryable() {
    let dispatcher = Arc::new(MockDispatcher {
        fail: true,
        ..MockDispatcher::default()
    });
    let transport = HttpTransport::new(spawn_server(dispatcher).await);

    let mut form = LeadForm::calculator();
    form.update(CalculatorField::SquareMeters, "40").unwrap();
    form.update(CalculatorField::Email, "a@b.com").unwrap();
    form.update(CalculatorField::Phone, "123").unwrap();

    let result = form.submit(&transport).await;
    assert!(matches!(result, Err(FormError::Transport(TransportError::Status(500)))));
    assert!(matches!(form.status(), FormStatus::Failed { .. }));
    assert_eq!(form.record().square_meters, 40);
}

#[tokio::test]
async fn test_unreachable_endpoint_reports_request_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{}/api/mail", addr));
    let mut form = LeadForm::quote();
    form.update(QuoteField::FullName, "Jane Doe").unwrap();
    form.update(QuoteField::Phone, "+971500000000").unwrap();

    let result = form.submit(&transport).await;
    assert!(matches!(result, Err(FormError::Transport(TransportError::Request(_)))));
    assert!(matches!(form.status(), FormStatus::Failed { .. }));
}

use crate::model::{CalculatorRequest, EmailContent, QuoteRequest, SubmissionEnvelope};

pub const NOT_PROVIDED: &str = "Not provided";
const COMPANY_NAME: &str = "Pobeda LLC";

/// One labelled line of a notification; both bodies render the same list
struct Field {
    label: &'static str,
    value: String,
}

impl Field {
    fn new(label: &'static str, value: &str) -> Self {
        let value = if value.is_empty() { NOT_PROVIDED } else { value };
        Field { label, value: value.to_string() }
    }
}

/// Render whichever notification the envelope calls for
pub fn render_submission(envelope: &SubmissionEnvelope) -> EmailContent {
    match envelope {
        SubmissionEnvelope::Quote(data) => format_quote_email(data, data.is_visit_only()),
        SubmissionEnvelope::Calculator(data) => format_calculator_email(data),
    }
}

pub fn format_quote_email(data: &QuoteRequest, is_visit_only: bool) -> EmailContent {
    let kind = if is_visit_only {
        "Free Site Visit Request"
    } else {
        "Project Quote Request"
    };

    let mut fields = vec![
        Field::new("Full Name", &data.full_name),
        Field::new("Phone", &data.phone),
        Field::new("Email", &data.email),
        Field::new("Property Size", &data.property_size),
        Field::new("Property Type", &data.property_type),
        Field::new("Location", &data.location),
    ];
    if !is_visit_only {
        fields.push(Field::new("Work Required", &data.work_required));
    }

    compose(kind, &fields)
}

pub fn format_calculator_email(data: &CalculatorRequest) -> EmailContent {
    let square_meters = data.square_meters.display_text();

    let fields = [
        Field::new("Square Meters", &square_meters),
        Field::new("Email", &data.email),
        Field::new("Phone", &data.phone),
    ];

    compose("Cost Calculation Request", &fields)
}

fn compose(kind: &str, fields: &[Field]) -> EmailContent {
    let subject = format!("New {} - {}", kind, COMPANY_NAME);
    let text = render_text(&subject, fields);
    let html = render_html(kind, fields);
    EmailContent { subject, html, text }
}

fn render_text(subject: &str, fields: &[Field]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|f| format!("{}: {}", f.label, f.value))
        .collect();
    format!("{}\n\n{}", subject, lines.join("\n"))
}

fn render_html(kind: &str, fields: &[Field]) -> String {
    let rows: String = fields
        .iter()
        .map(|f| {
            format!(
                r#"          <div class="field">
            <div class="label">{label}:</div>
            <div class="value">{value}</div>
          </div>
"#,
                label = f.label,
                value = html_escape::encode_text(&f.value)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background-color: #D4AF37; color: #000; padding: 20px; text-align: center; }}
    .content {{ background-color: #f9f9f9; padding: 20px; }}
    .field {{ margin-bottom: 15px; }}
    .label {{ font-weight: bold; color: #D4AF37; }}
    .value {{ margin-top: 5px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h2>New {kind}</h2>
    </div>
    <div class="content">
{rows}    </div>
  </div>
</body>
</html>"#,
        kind = kind,
        rows = rows
    )
}

//! UI Routes - HTML pages for the aqi-web interface
//!
//! Pages are rendered from inline templates; anything derived from a request
//! passes through [`escape_html`] first.

use aqi_common::Pollutant;
use axum::{http::StatusCode, response::Html, routing::get, Router};

use crate::api::predict::Assessment;
use crate::AppState;

const STYLE: &str = r#"
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 720px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
            color: #222;
        }
        h1 {
            border-bottom: 2px solid #2e7d32;
            padding-bottom: 10px;
        }
        label {
            display: block;
            margin-top: 12px;
            font-weight: 600;
        }
        input[type=text] {
            width: 100%;
            padding: 8px;
            box-sizing: border-box;
        }
        .button {
            display: inline-block;
            margin: 16px 8px 0 0;
            padding: 10px 20px;
            background: #2e7d32;
            color: white;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            cursor: pointer;
        }
        .prediction {
            font-size: 48px;
            font-weight: 700;
        }
        .error-code {
            font-size: 48px;
            font-weight: 700;
            color: #c62828;
        }
    </style>
"#;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(home_page))
}

/// Minimal HTML escaping for text and attribute content
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
{style}
</head>
<body>
{body}
    <p><small>aqi-web v{version}</small></p>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
    ))
}

/// GET /
pub async fn home_page() -> Html<String> {
    layout(
        "Air Quality Index Prediction",
        r#"    <h1>Air Quality Index Prediction</h1>
    <p>Estimate the AQI from six pollutant concentrations, either entered by hand or fetched live for a city.</p>
    <p>
        <a href="/predict_manually" class="button">Enter readings</a>
        <a href="/predict_automatically" class="button">Look up a city</a>
    </p>
"#,
    )
}

/// GET /predict_manually
pub async fn manual_form_page() -> Html<String> {
    let fields: String = Pollutant::ALL
        .iter()
        .map(|p| {
            format!(
                "        <label for=\"{key}\">{key}</label>\n        <input type=\"text\" id=\"{key}\" name=\"{key}\" required>\n",
                key = p.form_key()
            )
        })
        .collect();

    layout(
        "Enter Pollutant Readings",
        &format!(
            r#"    <h1>Enter Pollutant Readings</h1>
    <form method="post" action="/predict_manually">
{fields}        <button type="submit" class="button">Predict</button>
    </form>
"#
        ),
    )
}

/// GET /predict_automatically
pub async fn city_form_page() -> Html<String> {
    layout(
        "Predict by City",
        r#"    <h1>Predict by City</h1>
    <form method="post" action="/predict_automatically">
        <label for="city_name">City</label>
        <input type="text" id="city_name" name="city_name" required>
        <button type="submit" class="button">Predict</button>
    </form>
"#,
    )
}

/// Result page: numeric prediction, category headline, health guidance
pub fn results_page(assessment: &Assessment) -> Html<String> {
    layout(
        "AQI Prediction Result",
        &format!(
            r#"    <h1>AQI Prediction Result</h1>
    <p class="prediction">{prediction}</p>
    <h2>{label}</h2>
    <p>{description}</p>
    <p><a href="/" class="button">Back</a></p>
"#,
            prediction = assessment.prediction,
            label = escape_html(&assessment.category.label()),
            description = escape_html(assessment.category.description()),
        ),
    )
}

/// Error page carrying the message and status code
pub fn error_page(message: &str, status: StatusCode) -> Html<String> {
    layout(
        "Error",
        &format!(
            r#"    <h1>Something went wrong</h1>
    <p class="error-code">{code}</p>
    <p>{message}</p>
    <p><a href="/" class="button">Back</a></p>
"#,
            code = status.as_u16(),
            message = escape_html(message),
        ),
    )
}

//! Renders a validated contact submission into the notification email.

use chrono::{DateTime, Utc};
use contact_schema::ContactRequest;

use crate::config::Mailbox;
use crate::mailer::OutboundEmail;

const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

pub fn build_email(
    request: &ContactRequest,
    mailbox: &Mailbox,
    sent_at: DateTime<Utc>,
) -> OutboundEmail {
    OutboundEmail {
        from: mailbox.from.clone(),
        to: mailbox.to.clone(),
        subject: format!("{SUBJECT_PREFIX}{}", request.subject),
        html: render_html(request, sent_at),
        reply_to: Some(request.email.clone()),
    }
}

fn render_html(request: &ContactRequest, sent_at: DateTime<Utc>) -> String {
    let name = escape_html(&request.name);
    let email = escape_html(&request.email);
    let subject = escape_html(&request.subject);
    let message = line_breaks(&escape_html(&request.message));
    let timestamp = sent_at.format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px;">New Contact Form Submission</h2>
  <div style="background-color: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #007bff; margin-top: 0;">Contact Details</h3>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Subject:</strong> {subject}</p>
  </div>
  <div style="background-color: #fff; padding: 20px; border: 1px solid #dee2e6; border-radius: 8px;">
    <h3 style="color: #333; margin-top: 0;">Message</h3>
    <p style="line-height: 1.6; color: #555;">{message}</p>
  </div>
  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #dee2e6; color: #6c757d; font-size: 14px;">
    <p>This message was sent from your portfolio contact form at {timestamp}</p>
  </div>
</div>"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

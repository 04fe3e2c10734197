//! HTML rendering for the two emails produced per submission: the agency
//! notification and the applicant confirmation. Plain string interpolation,
//! no templating engine.

use chrono::{Datelike, Utc};

use super::{EmailAttachment, OutgoingEmail};
use crate::config::Config;
use crate::contact::SubmissionRequest;

/// How much of the applicant's message the confirmation email repeats back.
pub const MESSAGE_PREVIEW_CHARS: usize = 100;

const AGENCY_PHONE: &str = "(02) 84-2061-59";
const AGENCY_CONTACT_EMAIL: &str = "rocksolidskilled@gmail.com";
const AGENCY_ADDRESS: &str =
    "2nd Floor Lifestyle building, 1928 Leon Guinto Street, Brgy 692 Malate Manila";
const AGENCY_LICENSE: &str = "DMW-154-LB-08082023-R";

/// Notification to the agency inbox. Carries the résumé (if any) as a
/// provider attachment with its original filename and media type.
pub fn agency_notification(req: &SubmissionRequest, config: &Config) -> OutgoingEmail {
    let full_name = req.full_name();
    let email = req.email.trim();

    let cv_row = match &req.attachment {
        Some(attachment) => format!(
            "<tr><td style=\"color:#64748b;font-weight:600;\">CV Attached:</td>\
             <td style=\"color:#059669;\">&#128206; {}</td></tr>",
            attachment.filename
        ),
        None => String::new(),
    };

    let body = format!(
        "<div style=\"background:#fef3c7;border-left:4px solid #f59e0b;padding:20px;border-radius:8px;\">\
           <h2 style=\"color:#92400e;margin:0 0 10px 0;\">New Application Received</h2>\
           <p style=\"color:#b45309;margin:0;\">A potential candidate has submitted their information through your website.</p>\
         </div>\
         <h3>Contact Information</h3>\
         <table style=\"width:100%;border-collapse:collapse;\">\
           <tr><td style=\"color:#64748b;font-weight:600;width:120px;\">Full Name:</td><td>{full_name}</td></tr>\
           <tr><td style=\"color:#64748b;font-weight:600;\">Email:</td>\
               <td><a href=\"mailto:{email}\" style=\"color:#2563eb;text-decoration:none;\">{email}</a></td></tr>\
           {cv_row}\
         </table>\
         <h3>Message</h3>\
         <div style=\"background:#ffffff;padding:20px;border-radius:8px;border-left:4px solid #2563eb;\">\
           <p style=\"white-space:pre-wrap;margin:0;\">{message}</p>\
         </div>\
         <p style=\"text-align:center;\"><a href=\"mailto:{email}\" style=\"background:#2563eb;color:#ffffff;padding:15px 30px;text-decoration:none;border-radius:8px;\">Reply to Candidate</a></p>",
        message = req.message,
    );

    let footer = format!(
        "This email was automatically generated from your Rock Solid Manpower contact form.<br>\
         Received on {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let attachments = req
        .attachment
        .iter()
        .map(|attachment| EmailAttachment {
            filename: attachment.filename.clone(),
            content: attachment.encoded_content.clone(),
            content_type: attachment.media_type.clone(),
        })
        .collect();

    OutgoingEmail {
        from: config.from_address.clone(),
        to: vec![config.agency_email.clone()],
        subject: format!("New Contact Form Submission from {full_name}"),
        html: page("New Contact Form Submission", &body, &footer),
        attachments,
    }
}

/// Confirmation back to the applicant: submission summary with a truncated
/// message preview, plus the agency's static contact details.
pub fn applicant_confirmation(req: &SubmissionRequest, config: &Config) -> OutgoingEmail {
    let full_name = req.full_name();
    let email = req.email.trim();
    let first_name = req.first_name.trim();

    let cv_row = match &req.attachment {
        Some(attachment) => format!(
            "<tr><td style=\"color:#1e40af;font-weight:600;\">CV Submitted:</td>\
             <td style=\"color:#059669;\">&#9989; {}</td></tr>",
            attachment.filename
        ),
        None => String::new(),
    };

    let body = format!(
        "<div style=\"background:#dcfce7;padding:25px;border-radius:12px;text-align:center;\">\
           <h2 style=\"color:#065f46;margin:0 0 10px 0;\">Thank You, {first_name}!</h2>\
           <p style=\"color:#047857;margin:0;\">We have successfully received your message and will respond within 24 hours.</p>\
         </div>\
         <h3>Your Submission Summary</h3>\
         <table style=\"width:100%;border-collapse:collapse;\">\
           <tr><td style=\"color:#1e40af;font-weight:600;width:120px;\">Name:</td><td>{full_name}</td></tr>\
           <tr><td style=\"color:#1e40af;font-weight:600;\">Email:</td><td>{email}</td></tr>\
           {cv_row}\
           <tr><td style=\"color:#1e40af;font-weight:600;vertical-align:top;\">Message:</td><td>{preview}</td></tr>\
         </table>\
         <h3>Our Specialized Services</h3>\
         <p>We connect skilled Filipino workers with premium international job opportunities:</p>\
         <ul>\
           <li>Licensed recruitment agency ({license})</li>\
           <li>Comprehensive pre-deployment training</li>\
           <li>End-to-end support throughout your journey</li>\
         </ul>\
         <h3>Contact Information</h3>\
         <table style=\"width:100%;border-collapse:collapse;\">\
           <tr><td style=\"color:#6b7280;font-weight:600;width:80px;\">Phone:</td><td>{phone}</td></tr>\
           <tr><td style=\"color:#6b7280;font-weight:600;\">Email:</td>\
               <td><a href=\"mailto:{contact_email}\" style=\"color:#2563eb;text-decoration:none;\">{contact_email}</a></td></tr>\
           <tr><td style=\"color:#6b7280;font-weight:600;vertical-align:top;\">Address:</td><td>{address}</td></tr>\
         </table>\
         <p style=\"text-align:center;\">We look forward to helping you achieve your international career goals!<br>\
         Best regards,<br><span style=\"color:#2563eb;font-weight:600;\">The Rock Solid Manpower Team</span></p>",
        preview = message_preview(&req.message),
        license = AGENCY_LICENSE,
        phone = AGENCY_PHONE,
        contact_email = AGENCY_CONTACT_EMAIL,
        address = AGENCY_ADDRESS,
    );

    let footer = format!(
        "This is an automated confirmation email. Please do not reply to this message.<br>\
         &copy; {} Rock Solid Manpower. All rights reserved.",
        Utc::now().year()
    );

    OutgoingEmail {
        from: config.from_address.clone(),
        to: vec![email.to_string()],
        subject: "Thank you for contacting Rock Solid Manpower!".to_string(),
        html: page("Thank You - Rock Solid Manpower", &body, &footer),
        attachments: Vec::new(),
    }
}

/// First `MESSAGE_PREVIEW_CHARS` characters of the message, with an
/// ellipsis suffix when anything was cut.
pub fn message_preview(message: &str) -> String {
    if message.chars().count() <= MESSAGE_PREVIEW_CHARS {
        return message.to_string();
    }
    let truncated: String = message.chars().take(MESSAGE_PREVIEW_CHARS).collect();
    format!("{truncated}...")
}

/// Shared document shell: branded header, content, muted footer.
fn page(title: &str, body: &str, footer: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head><meta charset=\"UTF-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"><title>{title}</title></head>\
         <body style=\"margin:0;padding:0;font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;background-color:#f8fafc;line-height:1.6;\">\
           <div style=\"max-width:600px;margin:0 auto;background-color:#ffffff;\">\
             <div style=\"background:#2563eb;padding:40px 30px;text-align:center;\">\
               <h1 style=\"color:#ffffff;margin:0;font-size:28px;\">Rock Solid Manpower</h1>\
               <p style=\"color:#e0e7ff;margin:10px 0 0 0;\">Your Pathway to International Opportunities</p>\
             </div>\
             <div style=\"padding:40px 30px;\">{body}</div>\
             <div style=\"background:#f1f5f9;padding:20px 30px;text-align:center;\">\
               <p style=\"color:#64748b;margin:0;font-size:13px;\">{footer}</p>\
             </div>\
           </div>\
         </body>\
         </html>"
    )
}

// libs/notification-cell/src/services/webhook.rs

/// Canned autoresponder for inbound patient messages.
///
/// Pure keyword matching against a fixed reply set; there is no language
/// understanding and no conversation state.
pub fn canned_reply(body: &str) -> &'static str {
    let text = body.to_lowercase();

    if text.contains("cancel") {
        "To cancel an appointment, open it in the patient portal and submit a cancellation reason."
    } else if text.contains("book") || text.contains("appointment") {
        "To book an appointment, visit the patient portal, pick a doctor, clinic, date and time slot."
    } else if text.contains("hours") || text.contains("open") {
        "The clinic is open 08:00-18:00 with a midday break from 12:00."
    } else if text.contains("help") {
        "You can ask about: booking an appointment, cancelling, or opening hours."
    } else {
        "Thanks for your message. Reply HELP to see what I can answer."
    }
}

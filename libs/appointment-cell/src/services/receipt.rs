// libs/appointment-cell/src/services/receipt.rs
use serde::Serialize;

use crate::models::{Appointment, CardEntry, PaymentMethod};

/// Flat mock consultation fee; there is no payment processor behind this.
pub const CONSULTATION_FEE: &str = "$15.00";

/// Mask a card number down to its last four digits.
pub fn mask_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let last_four = &digits[digits.len().saturating_sub(4)..];
    format!("•••• •••• •••• {}", last_four)
}

/// Derived payment summary for a confirmed booking. Never persisted:
/// it exists only long enough to render a receipt, and only ever holds
/// the masked card number.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetails {
    pub status: String,
    pub amount: String,
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub card_number_masked: Option<String>,
    pub cardholder_name: Option<String>,
}

impl PaymentDetails {
    pub fn for_appointment(
        appointment: &Appointment,
        method: PaymentMethod,
        card: &CardEntry,
    ) -> Self {
        let id_text = appointment.id.to_string();
        let transaction_id = format!("PAY-{}", &id_text[..8]);

        let (card_number_masked, cardholder_name) = if method.is_card() {
            (
                Some(mask_card_number(&card.card_number)),
                Some(card.cardholder_name.clone()),
            )
        } else {
            (None, None)
        };

        Self {
            status: "Paid".to_string(),
            amount: CONSULTATION_FEE.to_string(),
            method,
            transaction_id,
            card_number_masked,
            cardholder_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptFile {
    pub file_name: String,
    pub contents: String,
}

/// Read-only summary of a confirmed appointment and its mock payment.
///
/// All three export paths (clipboard, download, print) render from one
/// canonical body, so field values can never diverge between them.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub doctor_name: String,
    pub schedule_text: String,
    pub reason: String,
    pub payment: PaymentDetails,
}

impl Receipt {
    pub fn generate(appointment: &Appointment, doctor_name: &str, payment: PaymentDetails) -> Self {
        Self {
            doctor_name: doctor_name.to_string(),
            schedule_text: appointment.schedule.format("%Y-%m-%d %H:%M").to_string(),
            reason: appointment.reason.clone(),
            payment,
        }
    }

    fn render(&self) -> String {
        let mut body = format!(
            "CLINIC APPOINTMENT RECEIPT\n\
             \n\
             Appointment Information:\n\
             Doctor: {}\n\
             Date & Time: {}\n\
             Reason: {}\n\
             \n\
             Payment Details:\n\
             Status: {}\n\
             Amount: {}\n\
             Payment Method: {}\n\
             Transaction ID: {}\n",
            self.doctor_name,
            self.schedule_text,
            self.reason,
            self.payment.status,
            self.payment.amount,
            self.payment.method,
            self.payment.transaction_id,
        );

        if let (Some(masked), Some(holder)) = (
            &self.payment.card_number_masked,
            &self.payment.cardholder_name,
        ) {
            body.push_str(&format!("Card Number: {}\nCardholder: {}\n", masked, holder));
        }

        body
    }

    pub fn clipboard_text(&self) -> String {
        self.render()
    }

    pub fn print_view(&self) -> String {
        self.render()
    }

    pub fn download(&self) -> ReceiptFile {
        ReceiptFile {
            file_name: format!("receipt-{}.txt", self.payment.transaction_id),
            contents: self.render(),
        }
    }
}

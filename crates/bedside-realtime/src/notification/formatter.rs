//! Notification message formatting.

use bedside_core::types::id::NotificationId;
use bedside_entity::care::{CareEvent, CareEventType};
use bedside_entity::notification::{Notification, NotificationType};

/// Title and body shown for a care event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Short heading.
    pub title: String,
    /// Body text. Never empty.
    pub message: String,
}

/// Formats notifications for care events.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Title and message for an event, keyed by its type.
    ///
    /// Missing or blank payload fields fall back to fixed text, so this
    /// never fails and never yields an empty message.
    pub fn message_for(event: &CareEvent) -> NotificationMessage {
        let (title, message) = match event.event_type {
            CareEventType::Drink => (
                "Registro de Líquidos",
                match event.volume {
                    Some(volume) => format!("{volume}ml de líquido administrado"),
                    None => "Líquido administrado".to_string(),
                },
            ),
            CareEventType::Meal => (
                "Registro de Alimentação",
                format!(
                    "Refeição registrada: {}",
                    non_blank(&event.meal_desc).unwrap_or("Sem descrição")
                ),
            ),
            CareEventType::Medication => {
                let parts: Vec<&str> = [non_blank(&event.med_name), non_blank(&event.med_dose)]
                    .into_iter()
                    .flatten()
                    .collect();
                let message = if parts.is_empty() {
                    "Medicamento administrado".to_string()
                } else {
                    format!("{} administrado", parts.join(" "))
                };
                ("Administração de Medicamento", message)
            }
            CareEventType::Bathroom => (
                "Registro de Eliminação",
                format!(
                    "Eliminação registrada: {}",
                    non_blank(&event.bathroom_type).unwrap_or("Tipo não especificado")
                ),
            ),
            CareEventType::Note => (
                "Anotação Médica",
                non_blank(&event.notes)
                    .unwrap_or("Nova anotação médica")
                    .to_string(),
            ),
            CareEventType::Other => (
                "Novo Registro de Cuidado",
                "Novo registro de cuidado".to_string(),
            ),
        };

        NotificationMessage {
            title: title.to_string(),
            message,
        }
    }

    /// Build an unread care-record notification for an event.
    pub fn care_record(event: &CareEvent, patient_name: impl Into<String>) -> Notification {
        let NotificationMessage { title, message } = Self::message_for(event);

        Notification {
            id: NotificationId::for_care_event(event.id),
            notification_type: NotificationType::CareRecord,
            title,
            message,
            patient_name: patient_name.into(),
            patient_id: event.patient_id,
            timestamp: event.created_at,
            read: false,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use bedside_core::types::id::PatientId;

    fn event(event_type: CareEventType) -> CareEvent {
        CareEvent::new(event_type, PatientId::new(), Utc::now())
    }

    #[test]
    fn test_medication_example() {
        let mut med = event(CareEventType::Medication);
        med.med_name = Some("Dipirona".to_string());
        med.med_dose = Some("500mg".to_string());

        let n = NotificationFormatter::care_record(&med, "João Silva");
        assert_eq!(n.title, "Administração de Medicamento");
        assert_eq!(n.message, "Dipirona 500mg administrado");
        assert_eq!(n.patient_name, "João Silva");
        assert_eq!(n.notification_type, NotificationType::CareRecord);
        assert_eq!(n.id, NotificationId::for_care_event(med.id));
        assert_eq!(n.timestamp, med.created_at);
        assert!(!n.read);
    }

    #[test]
    fn test_drink_with_volume() {
        let mut drink = event(CareEventType::Drink);
        drink.volume = Some(250);
        let msg = NotificationFormatter::message_for(&drink);
        assert_eq!(msg.title, "Registro de Líquidos");
        assert_eq!(msg.message, "250ml de líquido administrado");
    }

    #[test]
    fn test_fallbacks_for_missing_fields() {
        let cases = [
            (CareEventType::Drink, "Líquido administrado"),
            (CareEventType::Meal, "Refeição registrada: Sem descrição"),
            (CareEventType::Medication, "Medicamento administrado"),
            (
                CareEventType::Bathroom,
                "Eliminação registrada: Tipo não especificado",
            ),
            (CareEventType::Note, "Nova anotação médica"),
            (CareEventType::Other, "Novo registro de cuidado"),
        ];

        for (event_type, expected) in cases {
            let msg = NotificationFormatter::message_for(&event(event_type));
            assert_eq!(msg.message, expected, "for {event_type}");
            assert!(!msg.title.is_empty());
        }
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let mut note = event(CareEventType::Note);
        note.notes = Some("   ".to_string());
        assert_eq!(
            NotificationFormatter::message_for(&note).message,
            "Nova anotação médica"
        );

        let mut meal = event(CareEventType::Meal);
        meal.meal_desc = Some(String::new());
        assert_eq!(
            NotificationFormatter::message_for(&meal).message,
            "Refeição registrada: Sem descrição"
        );
    }

    #[test]
    fn test_medication_with_only_name() {
        let mut med = event(CareEventType::Medication);
        med.med_name = Some("Insulina".to_string());
        assert_eq!(
            NotificationFormatter::message_for(&med).message,
            "Insulina administrado"
        );
    }

    #[test]
    fn test_note_and_bathroom_payloads() {
        let mut note = event(CareEventType::Note);
        note.notes = Some("Paciente estável".to_string());
        let msg = NotificationFormatter::message_for(&note);
        assert_eq!(msg.title, "Anotação Médica");
        assert_eq!(msg.message, "Paciente estável");

        let mut bathroom = event(CareEventType::Bathroom);
        bathroom.bathroom_type = Some("urina".to_string());
        let msg = NotificationFormatter::message_for(&bathroom);
        assert_eq!(msg.title, "Registro de Eliminação");
        assert_eq!(msg.message, "Eliminação registrada: urina");
    }
}

//! What the user sees after a turn.

/// Reply to a single turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One plain text message.
    Text(String),
    /// Several messages, possibly including interactive elements.
    Rich(Vec<RichMessage>),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// All text carried by the reply, newline-joined. Buttons contribute
    /// their label.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Rich(messages) => messages
                .iter()
                .map(|message| match message {
                    RichMessage::Text(lines) => lines.join("\n"),
                    RichMessage::Button { text, .. } => text.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A single element of a rich reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichMessage {
    Text(Vec<String>),
    Button {
        text: String,
        link: String,
        icon_type: String,
        icon_color: String,
    },
}

/// Contact details shown by the helpline reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelplineCard {
    pub phone: String,
    pub whatsapp_link: String,
}

impl HelplineCard {
    pub fn new(phone: impl Into<String>, whatsapp_link: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            whatsapp_link: whatsapp_link.into(),
        }
    }

    /// Helpline number followed by a WhatsApp button.
    pub fn reply(&self) -> Reply {
        Reply::Rich(vec![
            RichMessage::Text(vec![format!(
                "📞 Our helpline number is: {}\nFeel free to call us anytime during business hours. We're here to help! 😊",
                self.phone
            )]),
            RichMessage::Button {
                text: "📱 WhatsApp".to_string(),
                link: self.whatsapp_link.clone(),
                icon_type: "chevron_right".to_string(),
                icon_color: "#25D366".to_string(),
            },
        ])
    }
}

impl Default for HelplineCard {
    fn default() -> Self {
        Self::new("02138899998", "https://wa.me/923151179953")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpline_reply_has_text_then_button() {
        let reply = HelplineCard::new("021-1234", "https://wa.me/1").reply();
        match reply {
            Reply::Rich(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(matches!(&messages[0], RichMessage::Text(lines) if lines[0].contains("021-1234")));
                assert!(matches!(
                    &messages[1],
                    RichMessage::Button { link, icon_color, .. }
                        if link == "https://wa.me/1" && icon_color == "#25D366"
                ));
            }
            other => panic!("expected rich reply, got {:?}", other),
        }
    }

    #[test]
    fn plain_text_flattens_rich_replies() {
        let text = HelplineCard::default().reply().plain_text();
        assert!(text.contains("02138899998"));
        assert!(text.ends_with("📱 WhatsApp"));
    }
}

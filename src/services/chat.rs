//! Farming assistant chat.
//!
//! Not an NLU system: replies come from an ordered table of keyword rules
//! evaluated first-match-wins over the lower-cased input, with a generic
//! fallback. Transcripts live in memory and disappear on restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::chat::ChatMessage,
};

/// Opening message seeded into every new session
const GREETING: &str = "Ask me anything about farming or equipment!";

const FALLBACK_REPLY: &str =
    "I'm not sure about that. Can you please ask something related to farming equipment or crops?";

/// One keyword rule: if any keyword occurs in the input, the reply is used.
/// Rules are evaluated in order and the first match wins, so earlier
/// keywords take priority over later ones.
struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

static RULES: &[Rule] = &[
    Rule {
        keywords: &["tractor"],
        reply: "Tractors are essential farming equipment. We offer various tractor models for rent and purchase, ranging from 20 HP to 75 HP. For small farms, 20-35 HP tractors are ideal, while larger operations benefit from 45-75 HP models.",
    },
    Rule {
        keywords: &["seed", "planting"],
        reply: "For seeding equipment, we have seed drills, planters, and broadcasters available. Modern seed drills can help you achieve uniform seed placement and better germination rates.",
    },
    Rule {
        keywords: &["harvest"],
        reply: "Our harvest equipment includes combine harvesters, threshers, and reapers. Combine harvesters are excellent for wheat, rice, and other grain crops, significantly reducing harvest time.",
    },
    Rule {
        keywords: &["rice", "paddy"],
        reply: "For rice cultivation, we recommend our specialized rice transplanters, paddy weeders, and rice combine harvesters. The ideal time for planting rice depends on your region, but it generally requires consistent water supply.",
    },
    Rule {
        keywords: &["wheat"],
        reply: "Wheat farming requires proper seed drills, fertilizer applicators, and harvest equipment. Our wheat combine harvesters can handle 1-2 acres per hour, making harvesting efficient.",
    },
    Rule {
        keywords: &["rent", "price"],
        reply: "Our rental prices vary based on equipment type and duration. Tractors start at \u{20b9}800/day, while specialized equipment like combine harvesters range from \u{20b9}1500-3000/day. For exact pricing, please check the equipment details page.",
    },
    Rule {
        keywords: &["soil", "fertilizer"],
        reply: "For soil preparation, we offer tillers, cultivators, and disc harrows. When applying fertilizers, our precision applicators can help optimize your input costs while maximizing yield.",
    },
];

/// Pick the reply for a user message. Pure; the service adds the delay.
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

#[derive(Clone)]
pub struct ChatService {
    sessions: Arc<RwLock<HashMap<Uuid, Vec<ChatMessage>>>>,
    reply_delay: Duration,
}

impl ChatService {
    pub fn new(reply_delay_ms: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            reply_delay: Duration::from_millis(reply_delay_ms),
        }
    }

    /// Append a user message to the session (creating it if needed), wait
    /// out the simulated thinking delay, and append and return the reply.
    pub async fn send_message(
        &self,
        session_id: Option<Uuid>,
        content: &str,
    ) -> AppResult<(Uuid, ChatMessage)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Message must not be empty".to_string()));
        }

        let session_id = match session_id {
            Some(id) => {
                let sessions = self.sessions.read().await;
                if !sessions.contains_key(&id) {
                    return Err(AppError::SessionNotFound(format!("Chat session {} not found", id)));
                }
                id
            }
            None => self.create_session().await,
        };

        {
            let mut sessions = self.sessions.write().await;
            let transcript = sessions
                .get_mut(&session_id)
                .ok_or_else(|| AppError::SessionNotFound(format!("Chat session {} not found", session_id)))?;
            transcript.push(ChatMessage::user(content));
        }

        tokio::time::sleep(self.reply_delay).await;

        let reply = ChatMessage::bot(respond(content));
        let mut sessions = self.sessions.write().await;
        let transcript = sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::SessionNotFound(format!("Chat session {} not found", session_id)))?;
        transcript.push(reply.clone());

        Ok((session_id, reply))
    }

    /// Full transcript of a session, in append order
    pub async fn transcript(&self, session_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .cloned()
            .ok_or_else(|| AppError::SessionNotFound(format!("Chat session {} not found", session_id)))
    }

    async fn create_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, vec![ChatMessage::bot(GREETING)]);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Sender;

    #[test]
    fn tractor_keyword_matches() {
        assert!(respond("Do you have any tractor for rent?").starts_with("Tractors are essential"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(respond("TRACTOR"), respond("tractor"));
    }

    #[test]
    fn first_rule_wins_on_multiple_keywords() {
        // "tractor" and "seed" both present: the tractor rule comes first
        let reply = respond("Which tractor should I use for seed drilling?");
        assert!(reply.starts_with("Tractors are essential"));
    }

    #[test]
    fn rent_and_price_share_a_rule() {
        assert_eq!(respond("what is the rent?"), respond("what is the price?"));
        assert!(respond("price please").contains("rental prices"));
    }

    #[test]
    fn unknown_input_gets_the_fallback() {
        assert_eq!(respond("tell me a joke"), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn session_transcript_is_append_only_and_ordered() {
        let chat = ChatService::new(0);
        let (session_id, reply) = chat.send_message(None, "hello wheat").await.unwrap();
        assert!(reply.content.contains("Wheat farming"));

        let (same_id, _) = chat
            .send_message(Some(session_id), "harvest time?")
            .await
            .unwrap();
        assert_eq!(same_id, session_id);

        let transcript = chat.transcript(session_id).await.unwrap();
        // greeting, user, bot, user, bot
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[0].sender, Sender::Bot);
        assert_eq!(transcript[1].sender, Sender::User);
        assert_eq!(transcript[1].content, "hello wheat");
        assert_eq!(transcript[4].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let chat = ChatService::new(0);
        let err = chat
            .send_message(Some(Uuid::new_v4()), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let chat = ChatService::new(0);
        let err = chat.send_message(None, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

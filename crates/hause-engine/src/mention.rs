//! Mention detection policy.
//!
//! Decides whether an inbound message is directed at the bot. The default
//! policy is intentionally permissive: any "@" counts as a mention, in
//! addition to the bot's configured name. The policy is a value on the
//! responder so a stricter matcher can be substituted without touching the
//! responder's control flow.

/// Policy deciding when an inbound message counts as a bot mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MentionPolicy {
    /// Respond when the message contains the bot's configured name
    /// (case-insensitive) OR any "@" character. Known-loose trigger.
    #[default]
    NameOrAtSign,
    /// Respond only on the bot's configured name (case-insensitive).
    NameOnly,
}

impl MentionPolicy {
    /// Returns whether `text` should be treated as directed at the bot.
    pub fn is_mention(&self, text: &str, bot_name: Option<&str>) -> bool {
        let name_matches = bot_name
            .map(|name| {
                !name.trim().is_empty() && text.to_lowercase().contains(&name.to_lowercase())
            })
            .unwrap_or(false);

        match self {
            Self::NameOrAtSign => name_matches || text.contains('@'),
            Self::NameOnly => name_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_sign_triggers_default_policy() {
        let policy = MentionPolicy::NameOrAtSign;
        assert!(policy.is_mention("hello @someone", None));
        assert!(policy.is_mention("hello @someone", Some("botty")));
    }

    #[test]
    fn test_plain_text_does_not_trigger() {
        let policy = MentionPolicy::NameOrAtSign;
        assert!(!policy.is_mention("hello there", None));
        assert!(!policy.is_mention("hello there", Some("botty")));
    }

    #[test]
    fn test_bot_name_is_case_insensitive() {
        let policy = MentionPolicy::NameOrAtSign;
        assert!(policy.is_mention("hey BOTTY, got a minute?", Some("botty")));
        assert!(policy.is_mention("hey botty", Some("Botty")));
    }

    #[test]
    fn test_name_only_policy_ignores_at_sign() {
        let policy = MentionPolicy::NameOnly;
        assert!(!policy.is_mention("hello @someone", Some("botty")));
        assert!(policy.is_mention("botty: hello", Some("botty")));
    }

    #[test]
    fn test_blank_bot_name_never_matches() {
        let policy = MentionPolicy::NameOnly;
        assert!(!policy.is_mention("anything at all", Some("  ")));
    }
}

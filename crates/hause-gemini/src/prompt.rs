//! Prompt templates for community content generation.
//!
//! Straight template substitution of configuration fields; no business logic
//! depends on the exact wording, but purpose, moderation level, engagement
//! style, posting frequency and retrieved context all have to reach the
//! model.

use hause_models::Community;

/// Builds the prompt for a reply to an inbound community message.
pub fn reply_prompt(community: &Community, message: &str, context: &[String]) -> String {
    let context_text = if context.is_empty() {
        "No additional context.".to_string()
    } else {
        context.join("\n")
    };

    let rules = if community.rules.is_empty() {
        String::new()
    } else {
        format!("\nCommunity rules:\n- {}\n", community.rules.join("\n- "))
    };

    format!(
        "You are an AI community manager for a Telegram community.\n\n\
        Community configuration:\n\
        - Purpose: {purpose}\n\
        - Moderation level: {moderation}\n\
        - Engagement style: {style}\n\
        - Posting frequency: {frequency}\n\
        {rules}\n\
        Relevant context:\n\
        {context}\n\n\
        User message: {message}\n\n\
        Respond in a {style} style, keeping moderation level {moderation} in mind.\n\
        Keep your response concise and helpful.",
        purpose = purpose_or_default(community),
        moderation = community.moderation_level.as_str(),
        style = community.engagement_style.as_str(),
        frequency = community.posting_frequency.as_str(),
        rules = rules,
        context = context_text,
        message = message,
    )
}

/// Builds the prompt for a scheduled or on-demand community post.
pub fn post_prompt(community: &Community, context: &[String]) -> String {
    let context_text = if context.is_empty() {
        "No uploaded documents.".to_string()
    } else {
        context.join("\n")
    };

    format!(
        "Generate an engaging message for a Telegram community with the following characteristics:\n\
        - Purpose: {purpose}\n\
        - Engagement style: {style}\n\
        - Moderation level: {moderation}\n\
        - Posting frequency: {frequency}\n\n\
        Context from uploaded documents:\n\
        {context}\n\n\
        Create a natural, engaging message that would fit this community's style.\n\
        Maximum 200 words.",
        purpose = purpose_or_default(community),
        style = community.engagement_style.as_str(),
        moderation = community.moderation_level.as_str(),
        frequency = community.posting_frequency.as_str(),
        context = context_text,
    )
}

/// Query text used to retrieve document context for a post.
pub fn post_context_query(community: &Community) -> String {
    format!(
        "Generate engaging content for a community about: {}",
        purpose_or_default(community)
    )
}

fn purpose_or_default(community: &Community) -> &str {
    if community.purpose.trim().is_empty() {
        "general discussion"
    } else {
        &community.purpose
    }
}

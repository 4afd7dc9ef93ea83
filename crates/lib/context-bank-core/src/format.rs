//! Text rendering for chat answers.

use context_bank_store::models::{Document, SendMessageResponse};

const SEPARATOR: &str = "---";
const UNKNOWN: &str = "Unknown";
const NO_MESSAGE: &str = "No message content";
pub const NO_LINK: &str = "No link available";

/// Renders a chat answer as a newline-joined text block.
///
/// Sections without data are dropped rather than rendered blank. Only the
/// first context document is cited.
#[must_use]
pub fn format_send_message_response(response: &SendMessageResponse) -> String {
    let message_id = response
        .message_id
        .map_or_else(|| UNKNOWN.to_string(), |id| id.to_string());
    let query = non_empty(response.rephrased_query.as_deref())
        .map(|query| format!("Query: {query}"))
        .unwrap_or_default();
    let message = non_empty(response.message.as_deref()).unwrap_or(NO_MESSAGE);
    let sources = response
        .context_docs
        .as_ref()
        .and_then(|docs| docs.top_documents.first())
        .map(format_sources)
        .unwrap_or_default();

    [
        format!("Message ID: {message_id}"),
        query,
        SEPARATOR.to_string(),
        message.to_string(),
        SEPARATOR.to_string(),
        sources,
    ]
    .into_iter()
    .filter(|block| !block.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

fn format_sources(doc: &Document) -> String {
    let source = non_empty(doc.semantic_identifier.as_deref()).unwrap_or(UNKNOWN);
    let relevance = doc
        .score
        .filter(|score| score.is_finite())
        .map_or_else(|| UNKNOWN.to_string(), format_score);
    let link = non_empty(doc.link.as_deref()).unwrap_or(NO_LINK);
    format!("Sources:\nTop source: {source}\nRelevance: {relevance}\nLink: {link}")
}

/// Two decimals, halves rounded away from zero.
fn format_score(score: f64) -> String {
    let rounded = (score * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use context_bank_store::models::ContextDocs;

    fn doc(identifier: Option<&str>, score: Option<f64>, link: Option<&str>) -> Document {
        Document {
            semantic_identifier: identifier.map(str::to_string),
            score,
            link: link.map(str::to_string),
            ..Document::default()
        }
    }

    fn response_with_docs(docs: Vec<Document>) -> SendMessageResponse {
        SendMessageResponse {
            message_id: Some(1),
            message: Some("hello".to_string()),
            rephrased_query: None,
            context_docs: Some(ContextDocs {
                top_documents: docs,
            }),
        }
    }

    #[test]
    fn renders_all_sections() {
        let mut response =
            response_with_docs(vec![doc(Some("Doc1"), Some(0.873), Some("http://x"))]);
        response.rephrased_query = Some("what is hello".to_string());

        assert_eq!(
            format_send_message_response(&response),
            "Message ID: 1\nQuery: what is hello\n---\nhello\n---\nSources:\nTop source: Doc1\nRelevance: 0.87\nLink: http://x"
        );
    }

    #[test]
    fn omits_query_and_sources_when_absent() {
        let response = SendMessageResponse {
            message_id: Some(5),
            message: Some("answer".to_string()),
            rephrased_query: None,
            context_docs: None,
        };
        let text = format_send_message_response(&response);

        assert_eq!(text, "Message ID: 5\n---\nanswer\n---");
        assert!(!text.contains("Query:"));
        assert!(!text.contains("Sources:"));
    }

    #[test]
    fn empty_query_and_empty_documents_are_dropped() {
        let mut response = response_with_docs(Vec::new());
        response.rephrased_query = Some(String::new());

        assert_eq!(format_send_message_response(&response), "Message ID: 1\n---\nhello\n---");
    }

    #[test]
    fn cites_only_the_first_document() {
        let response = response_with_docs(vec![
            doc(Some("First"), Some(1.5), Some("http://first")),
            doc(Some("Second"), Some(9.0), Some("http://second")),
        ]);
        let text = format_send_message_response(&response);

        assert!(text.contains("Top source: First"));
        assert!(text.contains("Relevance: 1.50"));
        assert!(!text.contains("Second"));
    }

    #[test]
    fn missing_document_fields_use_placeholders() {
        let response = response_with_docs(vec![doc(None, None, None)]);
        let text = format_send_message_response(&response);

        assert!(text.ends_with(
            "Sources:\nTop source: Unknown\nRelevance: Unknown\nLink: No link available"
        ));
    }

    #[test]
    fn non_finite_score_is_unknown() {
        let response = response_with_docs(vec![doc(Some("Doc"), Some(f64::NAN), Some("l"))]);
        assert!(format_send_message_response(&response).contains("Relevance: Unknown"));
    }

    #[test]
    fn missing_message_and_id_use_placeholders() {
        let response = SendMessageResponse::default();
        assert_eq!(
            format_send_message_response(&response),
            "Message ID: Unknown\n---\nNo message content\n---"
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let response = response_with_docs(vec![doc(Some("Doc1"), Some(-2.4761), None)]);
        let first = format_send_message_response(&response);
        let second = format_send_message_response(&response.clone());

        assert_eq!(first, second);
        assert!(first.contains("Relevance: -2.48"));
    }

    #[test]
    fn half_scores_round_away_from_zero() {
        let cases = [(0.125, "0.13"), (0.625, "0.63"), (-0.125, "-0.13"), (1.005, "1.00")];
        for (score, expected) in cases {
            let response = response_with_docs(vec![doc(Some("Doc1"), Some(score), None)]);
            let text = format_send_message_response(&response);
            assert!(
                text.contains(&format!("Relevance: {expected}\n")),
                "score {score} rendered as {text:?}"
            );
        }
    }
}

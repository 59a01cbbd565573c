use crate::command::{Target, UiCommand};
use crate::page::{PageContext, STAR_SELECTOR};

pub fn thank_you_message(value: &str) -> String {
    format!("Thanks! You rated this post {} out of 5 stars.", value)
}

/// Binds a click handler to every star the page carries. Each handler writes
/// the thank-you message for its own value; nothing is recorded.
///
/// A star without `data-value` still answers, reporting `null`.
pub fn activate_rating_stars(page: &PageContext) -> Vec<UiCommand> {
    page.stars
        .iter()
        .enumerate()
        .map(|(index, value)| UiCommand::OnClick {
            selector: STAR_SELECTOR.to_string(),
            index,
            action: Box::new(UiCommand::SetText {
                target: Target::RatingMessage,
                text: thank_you_message(value.as_deref().unwrap_or("null")),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Location;

    #[test]
    fn one_handler_per_star() {
        let mut page = PageContext::detail_page(Location::default());
        page.stars = vec![Some("1".into()), None, Some("3".into())];

        let commands = activate_rating_stars(&page);
        assert_eq!(commands.len(), 3);

        match &commands[2] {
            UiCommand::OnClick { selector, index, action } => {
                assert_eq!(selector, ".star");
                assert_eq!(*index, 2);
                assert_eq!(
                    **action,
                    UiCommand::SetText {
                        target: Target::RatingMessage,
                        text: "Thanks! You rated this post 3 out of 5 stars.".to_string(),
                    }
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn star_without_value_reports_null() {
        let mut page = PageContext::detail_page(Location::default());
        page.stars = vec![None];

        match &activate_rating_stars(&page)[0] {
            UiCommand::OnClick { index, action, .. } => {
                assert_eq!(*index, 0);
                assert_eq!(
                    **action,
                    UiCommand::SetText {
                        target: Target::RatingMessage,
                        text: "Thanks! You rated this post null out of 5 stars.".to_string(),
                    }
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn no_stars_no_handlers() {
        assert!(activate_rating_stars(&PageContext::default()).is_empty());
    }
}

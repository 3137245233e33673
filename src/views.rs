//! Inline HTML rendering for the three browser-facing pages. Small enough
//! that a template engine would outweigh the views themselves.

use axum::response::Html;
use uuid::Uuid;

use crate::entries::repo::Entry;

pub fn home_page() -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Daybook</title></head>\n<body>\n\
         <h1>Daybook</h1>\n\
         <form action=\"/create\" method=\"POST\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"email\" type=\"email\" placeholder=\"Email\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <input name=\"age\" type=\"number\" placeholder=\"Age\" required>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Already have an account? Log in</a></p>\n\
         </body>\n</html>\n"
    ))
}

pub fn login_page(error: Option<&str>) -> Html<String> {
    let notice = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape_html(msg)),
        None => String::new(),
    };
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Log in - Daybook</title></head>\n<body>\n\
         <h1>Log in</h1>\n{notice}\
         <form action=\"/login\" method=\"POST\">\n\
         <input name=\"email\" type=\"email\" placeholder=\"Email\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         </body>\n</html>\n"
    ))
}

pub fn journal_page(user_id: Uuid, entries: &[Entry]) -> Html<String> {
    let mut items = String::new();
    for entry in entries {
        items.push_str(&format!(
            "<li data-id=\"{}\"><time>{}</time> {}</li>\n",
            entry.id,
            entry.date,
            escape_html(&entry.content)
        ));
    }

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Journal - Daybook</title></head>\n<body>\n\
         <h1>Journal</h1>\n\
         <form action=\"/entries\" method=\"POST\">\n\
         <input type=\"hidden\" name=\"user_id\" value=\"{user_id}\">\n\
         <input name=\"date\" type=\"date\" required>\n\
         <textarea name=\"content\" placeholder=\"What happened today?\" required></textarea>\n\
         <button type=\"submit\">Add entry</button>\n\
         </form>\n\
         <ul>\n{items}</ul>\n\
         </body>\n</html>\n"
    ))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;

    fn entry(d: time::Date, content: &str) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: d,
            content: content.to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn journal_lists_entries_in_given_order() {
        let user_id = Uuid::new_v4();
        let entries = vec![
            entry(date!(2024 - 03 - 02), "newer entry"),
            entry(date!(2024 - 03 - 01), "older entry"),
        ];
        let Html(html) = journal_page(user_id, &entries);
        let newer = html.find("newer entry").expect("newer entry rendered");
        let older = html.find("older entry").expect("older entry rendered");
        assert!(newer < older);
        assert!(html.contains(&user_id.to_string()));
    }

    #[test]
    fn journal_escapes_entry_content() {
        let entries = vec![entry(date!(2024 - 01 - 01), "<script>alert(1)</script>")];
        let Html(html) = journal_page(Uuid::new_v4(), &entries);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn login_shows_error_only_when_present() {
        let Html(with_error) = login_page(Some("User not found"));
        assert!(with_error.contains("User not found"));
        let Html(without) = login_page(None);
        assert!(!without.contains("class=\"error\""));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }
}

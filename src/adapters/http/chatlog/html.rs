//! Minimal HTML shells for the history page and permalinks.
//!
//! Every user-supplied string is escaped. The history page carries its
//! state in a JSON block that the client script reads; `<`, `>` and `&` are
//! unicode-escaped there so no payload can close the script element.

use serde::Serialize;

use crate::application::handlers::chatlog::ChatLogView;

use super::dto::{ChatLogPageConfig, LogEntryPage};

/// Escape text for element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

pub fn render_chat_log(view: &ChatLogView, basepath: &str) -> Result<String, serde_json::Error> {
    let config = script_json(&ChatLogPageConfig::new(view, basepath))?;
    let date = view.date.format(crate::domain::foundation::DATE_FORMAT).to_string();

    let rooms: String = view
        .rooms
        .iter()
        .map(|room| {
            format!(
                "<li><a href=\"{base}/log/{room}/{date}\">#{room}</a></li>",
                base = escape_html(basepath),
                room = escape_html(room),
                date = escape_html(&date),
            )
        })
        .collect();

    let dates: String = view
        .dates
        .iter()
        .map(|d| {
            format!(
                "<li><a href=\"{base}/log/{room}/{d}\">{d}</a></li>",
                base = escape_html(basepath),
                room = escape_html(&view.room),
                d = escape_html(d),
            )
        })
        .collect();

    let messages: String = view
        .entries
        .iter()
        .map(|entry| {
            format!(
                "<li id=\"msg-{id}\"><span class=\"time\">{time}</span> \
                 <span class=\"sender\">{sender}</span> \
                 <span class=\"content\">{content}</span></li>",
                id = entry.id,
                time = escape_html(&entry.time),
                sender = escape_html(&entry.sender),
                content = escape_html(&entry.content),
            )
        })
        .collect();

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <nav><ul class=\"rooms\">{rooms}</ul><ul class=\"dates\">{dates}</ul></nav>\n\
         <ul id=\"messages\">{messages}</ul>\n\
         <script id=\"chatlog-config\" type=\"application/json\">{config}</script>\n\
         </body>\n</html>\n",
        title = escape_html(&view.title),
    ))
}

pub fn render_log_entry(page: &LogEntryPage) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <p class=\"time\">{time}</p>\n\
         <pre id=\"msg-{id}\" class=\"content\">{content}</pre>\n\
         </body>\n</html>\n",
        id = page.id,
        title = escape_html(&page.title),
        time = escape_html(&page.time),
        content = escape_html(&page.content),
    )
}

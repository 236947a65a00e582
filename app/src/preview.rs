use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};

/// Syntax highlighter for fenced code blocks. Presentation shells plug in a
/// real highlighter; [`PlainHighlighter`] just escapes and passes through.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str, theme: &str) -> String;
}

/// Pass-through highlighter: HTML-escapes the code and nothing more.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str, _theme: &str) -> String {
        escape_html(code)
    }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render markdown to HTML. Pure and synchronous.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Render markdown to HTML, routing fenced code blocks through the given
/// highlighter with the active theme name.
pub fn render_markdown_with(text: &str, highlighter: &dyn Highlighter, theme: &str) -> String {
    let mut events: Vec<Event> = Vec::new();
    let mut code_lang: Option<String> = None;
    let mut code_buf = String::new();

    for event in Parser::new_ext(text, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                code_lang = Some(lang.to_string());
                code_buf.clear();
            }
            Event::Text(t) if code_lang.is_some() => {
                code_buf.push_str(&t);
            }
            Event::End(Tag::CodeBlock(_)) if code_lang.is_some() => {
                if let Some(lang) = code_lang.take() {
                    let markup = highlighter.highlight(&code_buf, &lang, theme);
                    events.push(Event::Html(CowStr::from(format!(
                        "<pre><code class=\"language-{}\">{}</code></pre>",
                        lang, markup
                    ))));
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Whitespace-separated word count shown in the editor status bar.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

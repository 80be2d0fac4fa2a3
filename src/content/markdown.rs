//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use std::path::{Path, PathBuf};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::helpers::{html_escape, is_absolute_http};

const COPY_ICON: &str = r#"<svg viewBox="0 0 24 24" width="16" height="16" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="9" y="9" width="13" height="13" rx="2" ry="2"></rect><path d="M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1"></path></svg>"#;

/// Where optimized images and their placeholders live
#[derive(Debug, Clone)]
struct ImageAssets {
    /// URL prefix of optimized images, e.g. `/assets/images/`
    url_prefix: String,
    /// Directory holding `<name>-placeholder.txt` files
    dir: PathBuf,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    /// Site origin; absolute links outside it open in a new tab
    origin: String,
    images: Option<ImageAssets>,
}

struct CodeBlock {
    lang: Option<String>,
    fenced: bool,
    source: String,
}

struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            origin: String::new(),
            images: None,
        }
    }

    /// Create with custom settings
    pub fn with_options(origin: &str, images_url: &str, images_dir: &Path) -> Self {
        let prefix = format!("/{}/", images_url.trim_matches('/'));
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            origin: origin.trim_end_matches('/').to_string(),
            images: Some(ImageAssets {
                url_prefix: prefix,
                dir: images_dir.to_path_buf(),
            }),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<CodeBlock> = None;
        let mut image: Option<PendingImage> = None;

        for event in parser {
            if code.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some(block) = code.as_mut() {
                            block.source.push_str(&text);
                        }
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(block) = code.take() {
                            events.push(Event::Html(CowStr::from(self.code_block(&block))));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if image.is_some() {
                match event {
                    Event::End(TagEnd::Image) => {
                        if let Some(img) = image.take() {
                            events.push(Event::InlineHtml(CowStr::from(self.image(&img))));
                        }
                    }
                    Event::Text(text) | Event::Code(text) => {
                        if let Some(img) = image.as_mut() {
                            img.alt.push_str(&text);
                        }
                    }
                    Event::SoftBreak | Event::HardBreak => {
                        if let Some(img) = image.as_mut() {
                            img.alt.push(' ');
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let (lang, fenced) = match kind {
                        CodeBlockKind::Fenced(info) => (
                            info.split_whitespace().next().map(|s| s.to_string()),
                            true,
                        ),
                        CodeBlockKind::Indented => (None, false),
                    };
                    code = Some(CodeBlock {
                        lang,
                        fenced,
                        source: String::new(),
                    });
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some(PendingImage {
                        src: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                    });
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let open = self.link_open(link_type, &dest_url, &title);
                    events.push(Event::InlineHtml(CowStr::from(open)));
                }
                Event::End(TagEnd::Link) => {
                    events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Wrap a code block with its language label and copy button
    fn code_block(&self, block: &CodeBlock) -> String {
        if !block.fenced {
            return format!("<pre><code>{}</code></pre>\n", html_escape(&block.source));
        }

        let lang = block.lang.as_deref().unwrap_or("");
        let body = self
            .highlight_code(&block.source, lang)
            .unwrap_or_else(|| html_escape(&block.source));
        let class = if lang.is_empty() {
            "hljs".to_string()
        } else {
            format!("language-{} hljs", html_escape(lang))
        };
        let label = if lang.is_empty() {
            "text".to_string()
        } else {
            html_escape(lang)
        };

        format!(
            "<div class=\"code-block\">\n\
             <div class=\"code-header\">\n\
             <span class=\"code-lang\">{}</span>\n\
             <button class=\"copy-btn\" aria-label=\"Copy code\">{}</button>\n\
             </div>\n\
             <pre><code class=\"{}\">{}</code></pre>\n\
             </div>\n",
            label, COPY_ICON, class, body
        )
    }

    /// Class-based highlighting; None when the language is unknown
    fn highlight_code(&self, code: &str, lang: &str) -> Option<String> {
        if lang.is_empty() {
            return None;
        }
        let syntax = self.syntax_set.find_syntax_by_token(lang)?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting {} failed, falling back to plain text: {}", lang, e);
                return None;
            }
        }
        Some(generator.finalize())
    }

    /// Lazy image, using the precomputed placeholder when one exists
    fn image(&self, img: &PendingImage) -> String {
        let title = if img.title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, html_escape(&img.title))
        };

        if let Some(placeholder) = self.placeholder_for(&img.src) {
            return format!(
                r#"<div class="lazy-image"><img src="{}" data-src="{}" data-loaded="false" alt="{}"{} loading="lazy" decoding="async"></div>"#,
                html_escape(&placeholder),
                html_escape(&img.src),
                html_escape(&img.alt),
                title
            );
        }

        format!(
            r#"<img src="{}" alt="{}"{} loading="lazy" decoding="async">"#,
            html_escape(&img.src),
            html_escape(&img.alt),
            title
        )
    }

    fn placeholder_for(&self, src: &str) -> Option<String> {
        let assets = self.images.as_ref()?;
        let relative = src.strip_prefix(&assets.url_prefix)?;
        let base = Path::new(relative).with_extension("");
        let path = assets
            .dir
            .join(format!("{}-placeholder.txt", base.to_string_lossy()));

        let data = std::fs::read_to_string(&path).ok()?;
        let data = data.trim();
        if data.is_empty() {
            None
        } else {
            Some(data.to_string())
        }
    }

    fn link_open(&self, link_type: LinkType, dest: &str, title: &str) -> String {
        let href = if link_type == LinkType::Email && !dest.starts_with("mailto:") {
            format!("mailto:{}", dest)
        } else {
            dest.to_string()
        };

        let mut tag = format!(r#"<a href="{}""#, html_escape(&href));
        if !title.is_empty() {
            tag.push_str(&format!(r#" title="{}""#, html_escape(title)));
        }
        if self.is_external(&href) {
            tag.push_str(r#" target="_blank" rel="noopener noreferrer""#);
        }
        tag.push('>');
        tag
    }

    /// Absolute http(s) link that leaves the site
    fn is_external(&self, href: &str) -> bool {
        is_absolute_http(href) && (self.origin.is_empty() || !href.starts_with(&self.origin))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<div class="code-block">"#));
        assert!(html.contains(r#"<span class="code-lang">rust</span>"#));
        assert!(html.contains(r#"<button class="copy-btn" aria-label="Copy code">"#));
        assert!(html.contains(r#"<code class="language-rust hljs">"#));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\n<b>&</b>\n```");
        assert!(html.contains(r#"<span class="code-lang">nosuchlang</span>"#));
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_fence_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain\n```");
        assert!(html.contains(r#"<span class="code-lang">text</span>"#));
        assert!(html.contains(r#"<code class="hljs">plain"#));
    }

    #[test]
    fn test_indented_code_has_no_header() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Para\n\n    indented <code>\n");
        assert!(html.contains("<pre><code>indented &lt;code&gt;"));
        assert!(!html.contains("code-header"));
    }

    #[test]
    fn test_external_links() {
        let renderer =
            MarkdownRenderer::with_options("https://me.dev", "assets/images", Path::new("/nonexistent"));
        let html = renderer.render(
            "[out](https://rust-lang.org) [home](https://me.dev/about.html) [rel](/blog/a.html)",
        );
        assert!(html.contains(
            r#"<a href="https://rust-lang.org" target="_blank" rel="noopener noreferrer">out</a>"#
        ));
        assert!(html.contains(r#"<a href="https://me.dev/about.html">home</a>"#));
        assert!(html.contains(r#"<a href="/blog/a.html">rel</a>"#));
    }

    #[test]
    fn test_email_autolink() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<me@example.com>");
        assert!(html.contains(r#"<a href="mailto:me@example.com">me@example.com</a>"#));
    }

    #[test]
    fn test_image_without_placeholder() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![A *cat*](/img/cat.png \"Cat\")");
        assert!(html.contains(
            r#"<img src="/img/cat.png" alt="A cat" title="Cat" loading="lazy" decoding="async">"#
        ));
    }

    #[test]
    fn test_image_with_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("trip")).unwrap();
        fs::write(
            dir.path().join("trip/beach-placeholder.txt"),
            "data:image/webp;base64,AAAA\n",
        )
        .unwrap();

        let renderer = MarkdownRenderer::with_options("", "/assets/images/", dir.path());
        let html = renderer.render("![Beach](/assets/images/trip/beach.webp)");
        assert!(html.contains(r#"<div class="lazy-image">"#));
        assert!(html.contains(r#"src="data:image/webp;base64,AAAA""#));
        assert!(html.contains(r#"data-src="/assets/images/trip/beach.webp""#));
        assert!(html.contains(r#"data-loaded="false" alt="Beach""#));
    }
}

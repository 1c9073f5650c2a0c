use comrak::ComrakOptions;

/// Converts article bodies to HTML with GitHub-flavored extensions. Raw HTML
/// in the source is passed through unsanitized.
#[derive(Debug)]
pub struct MarkdownRenderer {
    option: ComrakOptions,
}

impl MarkdownRenderer {
    pub fn new() -> MarkdownRenderer {
        let mut option = ComrakOptions::default();
        option.extension.strikethrough = true;
        option.extension.footnotes = true;
        option.extension.autolink = true;
        option.extension.table = true;
        option.extension.tasklist = true;
        option.extension.description_lists = true;
        option.extension.front_matter_delimiter = Some("---".to_string());
        option.render.unsafe_ = true;

        MarkdownRenderer { option }
    }

    pub fn render(&self, markdown: &str) -> String {
        comrak::markdown_to_html(markdown, &self.option)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        MarkdownRenderer::new()
    }
}

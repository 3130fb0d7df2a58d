use nirnay_config::PostprocessConfig;

/// Apply HTML minification if enabled
///
/// Returns the original content unchanged if `config.minify_html` is `false`,
/// otherwise returns minified HTML. The embedded style sheet is minified too.
#[must_use]
pub fn process_html(content: &str, config: &PostprocessConfig) -> String {
  if !config.minify_html {
    return content.to_string();
  }

  let html_opts = config.html_options();

  let cfg = minify_html::Cfg {
    keep_comments: !html_opts.remove_comments,
    minify_css: true,
    ..minify_html::Cfg::default()
  };

  let minified = minify_html::minify(content.as_bytes(), &cfg);
  String::from_utf8_lossy(&minified).into_owned()
}

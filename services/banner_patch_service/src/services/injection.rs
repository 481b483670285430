use lazy_regex::{Lazy, Regex, regex};

/// First opening `<section ...>` tag, attributes included.
pub static SECTION_OPEN_TAG_REGEX: &Lazy<Regex> =
    regex!(r"(<section[\s\S]*?>)");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    AlreadyPresent,
    Injected(String),
    /// No opening section tag, the content is left as is.
    AnchorNotFound,
}

/// Places `render_tag` on its own line right after the first opening section
/// tag unless `content` already contains it.
pub fn inject_render_tag(content: &str, render_tag: &str) -> Injection {
    if content.contains(render_tag) {
        return Injection::AlreadyPresent;
    }

    let Some(anchor) = SECTION_OPEN_TAG_REGEX.find(content) else {
        return Injection::AnchorNotFound;
    };

    let (head, tail) = content.split_at(anchor.end());
    let mut patched =
        String::with_capacity(content.len() + render_tag.len() + 3);

    patched.push_str(head);
    patched.push_str("\n  ");
    patched.push_str(render_tag);
    patched.push_str(tail);

    Injection::Injected(patched)
}

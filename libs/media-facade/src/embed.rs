/// Client-side fallback script served after the vendor configuration.
///
/// Watches the document for `<img>` elements whose `src` carries a composite
/// identifier. Such images are first pointed at the storage half of the
/// identifier; if that copy fails to load, the handler swaps back to the CDN
/// half with a cache-busting query and drops the `s3` marker class.
pub(crate) const FALLBACK_OBSERVER_SCRIPT: &str = r##"<script type="module">
const mutationObserver = new MutationObserver((mutations) => {
   Array.from(document.querySelectorAll("img")).forEach((image) => {
       const parts = image.src.split("#");
       if (parts.length > 1) {
           image.onerror = (event) => {
               event.target.src = `${parts[0]}?${Date.now()}`;
               image.classList.remove("s3");
               image.onerror = undefined;
           };
           image.classList.add("s3");
           image.src = parts[1];
       }
    });
});
mutationObserver.observe(document.body, {childList: true, subtree: true, attributes: true });
</script>
"##;

/// Join the vendor configuration script with the fallback script.
pub(crate) fn embed_script(js_config: &str) -> String {
    format!("{js_config}\n{FALLBACK_OBSERVER_SCRIPT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_script_shape() {
        assert!(FALLBACK_OBSERVER_SCRIPT.starts_with("<script type=\"module\">\n"));
        assert!(FALLBACK_OBSERVER_SCRIPT.ends_with("</script>\n"));
    }

    #[test]
    fn test_fallback_script_splits_composite_sources() {
        assert!(FALLBACK_OBSERVER_SCRIPT.contains("image.src.split(\"#\")"));
        assert!(FALLBACK_OBSERVER_SCRIPT.contains("image.src = parts[1];"));
        assert!(FALLBACK_OBSERVER_SCRIPT.contains("${parts[0]}?${Date.now()}"));
    }

    #[test]
    fn test_fallback_script_marks_images() {
        assert!(FALLBACK_OBSERVER_SCRIPT.contains("image.classList.add(\"s3\")"));
        assert!(FALLBACK_OBSERVER_SCRIPT.contains("image.classList.remove(\"s3\")"));
    }

    #[test]
    fn test_fallback_script_observes_whole_document() {
        assert!(FALLBACK_OBSERVER_SCRIPT.contains(
            "mutationObserver.observe(document.body, {childList: true, subtree: true, attributes: true });"
        ));
    }

    #[test]
    fn test_embed_script_prepends_vendor_config() {
        let vendor = "<script type='text/javascript'>\n$.cloudinary.config({});\n</script>\n";
        let script = embed_script(vendor);

        assert!(script.starts_with(vendor));
        assert_eq!(
            script,
            format!("{vendor}\n{FALLBACK_OBSERVER_SCRIPT}")
        );
    }
}

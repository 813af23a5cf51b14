use crate::config::{RunContext, Status};

const SHORT_SHA_LEN: usize = 7;

/// First seven characters of a commit id, or the whole thing if shorter.
pub fn short_sha(commit: &str) -> &str {
    match commit.char_indices().nth(SHORT_SHA_LEN) {
        Some((end, _)) => &commit[..end],
        None => commit,
    }
}

/// Render the HTML notification body.
///
/// CI-provided names are interpolated verbatim. They come from the runner's
/// own metadata, so no HTML escaping is applied.
pub fn render(run: &RunContext, raw_status: &str, status: Status) -> String {
    [
        format!(
            "<b>Repository:</b> <a href=\"{}\">{}</a>",
            run.repo_url(),
            run.repository
        ),
        format!(
            "<b>Workflow:</b> <a href=\"{}\">{}</a>",
            run.run_url(),
            run.workflow
        ),
        format!(
            "<b>Branch:</b> <a href=\"{}\">{}</a>",
            run.ref_url(),
            run.ref_name
        ),
        format!(
            "<b>Commit:</b> <a href=\"{}\">{}</a>",
            run.commit_url(),
            short_sha(&run.commit)
        ),
        format!("<b>Status:</b> {} {}", raw_status, status.icon()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn widget_run() -> RunContext {
        RunContext {
            server_url: "https://github.com".into(),
            repository: "acme/widget".into(),
            workflow: "CI".into(),
            ref_name: "main".into(),
            commit: "abc1234def".into(),
            run_id: "42".into(),
        }
    }

    #[test]
    fn test_short_sha_full_length() {
        let sha = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(sha.len(), 40);
        assert_eq!(short_sha(sha), "0123456");
    }

    #[test]
    fn test_short_sha_short_input() {
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
        assert_eq!(short_sha("abcdefg"), "abcdefg");
    }

    #[test]
    fn test_render_scenario() {
        let msg = render(&widget_run(), "success", Status::Success);
        let lines: Vec<_> = msg.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<b>Repository:</b> <a href=\"https://github.com/acme/widget\">acme/widget</a>",
                "<b>Workflow:</b> <a href=\"https://github.com/acme/widget/actions/runs/42\">CI</a>",
                "<b>Branch:</b> <a href=\"https://github.com/acme/widget/tree/main\">main</a>",
                "<b>Commit:</b> <a href=\"https://github.com/acme/widget/commit/abc1234def\">abc1234</a>",
                "<b>Status:</b> success 🟢",
            ]
        );
        assert!(!msg.ends_with('\n'));
    }

    #[test]
    fn test_render_keeps_raw_status_text() {
        let msg = render(&widget_run(), "FAILURE", Status::Failure);
        assert!(msg.ends_with("<b>Status:</b> FAILURE 🔴"));
    }

    #[test]
    fn test_render_empty_context() {
        let msg = render(&RunContext::default(), "cancelled", Status::Cancelled);
        assert_eq!(msg.lines().count(), 5);
        assert!(msg.starts_with("<b>Repository:</b> <a href=\"/\"></a>"));
        assert!(msg.contains("<a href=\"//actions/runs/\"></a>"));
        assert!(msg.ends_with("cancelled ⚪️"));
    }

    proptest! {
        #[test]
        fn prop_short_sha_is_prefix(commit in "[0-9a-f]{0,40}") {
            let short = short_sha(&commit);
            prop_assert!(commit.starts_with(short));
            prop_assert_eq!(short.chars().count(), commit.chars().count().min(7));
        }

        #[test]
        fn prop_always_five_labelled_lines(
            repo in "[a-z]{1,8}/[a-z]{1,8}",
            workflow in "[A-Za-z ]{0,16}",
            ref_name in "[a-z/-]{0,16}",
            commit in "[0-9a-f]{0,40}",
            run_id in "[0-9]{0,10}",
        ) {
            let run = RunContext {
                server_url: "https://github.com".into(),
                repository: repo,
                workflow,
                ref_name,
                commit,
                run_id,
            };
            let msg = render(&run, "success", Status::Success);
            let labels: Vec<_> = msg
                .split('\n')
                .map(|l| l.split("</b>").next().unwrap_or_default())
                .collect();
            prop_assert_eq!(
                labels,
                vec!["<b>Repository:", "<b>Workflow:", "<b>Branch:", "<b>Commit:", "<b>Status:"]
            );
        }
    }
}

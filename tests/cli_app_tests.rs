#[cfg(feature = "cli_app")]
#[cfg(test)]
mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use regression_calculator::cli_app::{
        describe_figure, process_command, split_fit_args, FIT_USAGE, HELP,
    };
    use regression_calculator::engine::Figure;
    use regression_calculator::session::{Session, WindowState};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn doubling_csv(dir: &TempDir) -> PathBuf {
        write_csv(dir, "ab.csv", "a,b\n1,2\n2,4\n3,6\n")
    }

    // --- process_command ---

    #[test]
    fn test_process_open_fit_predict() {
        let dir = TempDir::new().unwrap();
        let path = doubling_csv(&dir);
        let mut session = Session::new();
        let mut status_msg = String::new();

        let out = process_command(&mut session, &format!("open {}", path.display()), &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Loading a CSV] CSV Loaded Successfully"));
        assert_eq!(status_msg, "ok");

        let out = process_command(&mut session, "fit a b", &mut status_msg).unwrap();
        assert!(out.starts_with("fitted: b = 2.0000·a + 0.0000"));
        assert_eq!(session.state(), WindowState::Fitted);

        let out = process_command(&mut session, "predict 4", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Prediction] 8.00"));
        assert_eq!(status_msg, "ok");
    }

    #[test]
    fn test_process_open_rejects_non_csv() {
        let mut session = Session::new();
        let mut status_msg = String::new();

        let out = process_command(&mut session, "open /tmp/data.txt", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Loading a CSV] Loading Failed"));
        assert_eq!(status_msg, "error");
        assert!(session.file_path().is_none());

        // Bare `open` behaves like a cancelled dialog
        let out = process_command(&mut session, "open", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Loading a CSV] Loading Failed"));
    }

    #[test]
    fn test_process_open_path_with_spaces() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "my data.csv", "a,b\n1,2\n2,4\n");
        let mut session = Session::new();
        let mut status_msg = String::new();

        process_command(&mut session, &format!("open {}", path.display()), &mut status_msg);
        assert_eq!(session.file_path(), Some(path.as_path()));
    }

    #[test]
    fn test_process_fit_usage() {
        let mut session = Session::new();
        let mut status_msg = String::new();

        let out = process_command(&mut session, "fit a", &mut status_msg);
        assert_eq!(out.as_deref(), Some(FIT_USAGE));
        assert_eq!(status_msg, "Invalid command");

        let out = process_command(&mut session, "fit a b c", &mut status_msg);
        assert_eq!(out.as_deref(), Some(FIT_USAGE));
    }

    #[test]
    fn test_split_fit_args() {
        assert_eq!(split_fit_args("a b"), Some(("a", "b")));
        assert_eq!(split_fit_args("first x,second y"), Some(("first x", "second y")));
        assert_eq!(split_fit_args("a, b"), Some(("a", " b")));
        assert_eq!(split_fit_args("a"), None);
        assert_eq!(split_fit_args(""), None);
    }

    #[test]
    fn test_process_fit_labels_with_spaces() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "spaced.csv", "first x,second y\n1,2\n2,4\n3,6\n");
        let mut session = Session::new();
        let mut status_msg = String::new();

        process_command(&mut session, &format!("open {}", path.display()), &mut status_msg);
        let out = process_command(&mut session, "fit first x,second y", &mut status_msg).unwrap();
        assert!(out.starts_with("fitted: second y = 2.0000·first x"));
        assert_eq!(session.state(), WindowState::Fitted);

        let out = process_command(&mut session, "predict 4", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Prediction] 8.00"));
    }

    #[test]
    fn test_process_fit_errors_are_reported() {
        let mut session = Session::new();
        let mut status_msg = String::new();

        let out = process_command(&mut session, "fit a b", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Regression] No CSV file has been loaded"));
        assert_eq!(status_msg, "error");

        let out = process_command(&mut session, "predict 2", &mut status_msg);
        assert_eq!(
            out.as_deref(),
            Some("[Prediction] No regression model has been fitted yet")
        );

        let out = process_command(&mut session, "predict two", &mut status_msg);
        assert_eq!(out.as_deref(), Some("[Prediction] 'two' is not a valid integer"));
    }

    #[test]
    fn test_process_plot_and_status() {
        let dir = TempDir::new().unwrap();
        let path = doubling_csv(&dir);
        let mut session = Session::new();
        let mut status_msg = String::new();

        let out = process_command(&mut session, "plot", &mut status_msg).unwrap();
        assert_eq!(out, "placeholder: (0, 10) (1, 1) (2, 20) (3, 3) (4, 40)");

        let out = process_command(&mut session, "status", &mut status_msg).unwrap();
        assert_eq!(out, "state: no file loaded");

        process_command(&mut session, &format!("open {}", path.display()), &mut status_msg);
        process_command(&mut session, "fit a b", &mut status_msg);

        let out = process_command(&mut session, "plot", &mut status_msg).unwrap();
        assert!(out.starts_with("scatter: 3 points of b vs a"));
        assert!(out.contains("\nline: (1, "));

        let out = process_command(&mut session, "status", &mut status_msg).unwrap();
        assert!(out.starts_with("state: fit complete"));
        assert!(out.contains("n = 3"));
    }

    #[test]
    fn test_process_unrecognized_and_help() {
        let mut session = Session::new();
        let mut status_msg = String::new();

        assert!(process_command(&mut session, "frobnicate", &mut status_msg).is_none());
        assert_eq!(status_msg, "unrecognized cmd");

        let out = process_command(&mut session, "help", &mut status_msg);
        assert_eq!(out.as_deref(), Some(HELP));
        assert_eq!(status_msg, "ok");
    }

    #[test]
    fn test_describe_placeholder_figure() {
        let text = describe_figure(&Figure::placeholder());
        assert!(text.starts_with("placeholder:"));
        assert_eq!(text.matches('(').count(), 5);
    }

    // --- binary, driven over stdin ---

    #[test]
    fn test_binary_session() {
        let dir = TempDir::new().unwrap();
        let path = doubling_csv(&dir);
        let script = format!("open {}\nfit a b\npredict 4\nq\npredict 5\n", path.display());

        Command::cargo_bin("regression-calculator")
            .unwrap()
            .write_stdin(script)
            .assert()
            .success()
            .stdout(predicate::str::contains("CSV Loaded Successfully"))
            .stdout(predicate::str::contains("[Prediction] 8.00"))
            // Nothing after `q` runs
            .stdout(predicate::str::contains("10.00").not());
    }

    #[test]
    fn test_binary_preselects_file_argument() {
        let dir = TempDir::new().unwrap();
        let path = doubling_csv(&dir);

        Command::cargo_bin("regression-calculator")
            .unwrap()
            .arg(&path)
            .write_stdin("fit a b\npredict 10\n")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("[Loading a CSV] CSV Loaded Successfully"))
            .stdout(predicate::str::contains("[Prediction] 20.00"));
    }

    #[test]
    fn test_binary_survives_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "words.csv", "a,b\n1,x\n");

        Command::cargo_bin("regression-calculator")
            .unwrap()
            .write_stdin(format!(
                "predict 1\nopen notes.txt\nopen {}\nfit a b\nfit a zz\npredict abc\nbogus\n",
                path.display()
            ))
            .assert()
            .success()
            .stdout(predicate::str::contains("No regression model has been fitted yet"))
            .stdout(predicate::str::contains("Loading Failed"))
            .stdout(predicate::str::contains("is not a number"))
            .stdout(predicate::str::contains("not found in header: zz"))
            .stdout(predicate::str::contains("'abc' is not a valid integer"))
            .stdout(predicate::str::contains("unrecognized cmd"));
    }
}

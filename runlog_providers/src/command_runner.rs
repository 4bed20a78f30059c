use std::ffi::OsString;
use std::path::Path;

pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
}

/// `<program> <image> stdout -l <language>`, the tesseract CLI shape.
#[must_use]
pub fn recognize_command(program: &str, image: &Path, language: &str) -> CommandSpec {
    CommandSpec {
        program: program.to_string(),
        args: vec![
            image.as_os_str().to_owned(),
            OsString::from("stdout"),
            OsString::from("-l"),
            OsString::from(language),
        ],
    }
}

#[must_use]
pub fn build_command(spec: &CommandSpec) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args).kill_on_drop(true);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_command_shape() {
        let spec = recognize_command("tesseract", Path::new("/tmp/a.jpg"), "eng");
        assert_eq!(spec.program, "tesseract");
        assert_eq!(
            spec.args,
            vec![
                OsString::from("/tmp/a.jpg"),
                OsString::from("stdout"),
                OsString::from("-l"),
                OsString::from("eng"),
            ]
        );
    }
}

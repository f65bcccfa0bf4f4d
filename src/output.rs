use colored::Colorize;

/// Progress line. Bold in debug mode so it stands out from subprocess output.
pub fn event(text: &str, debug: bool) {
    if debug {
        println!("{}", text.bold());
    } else {
        println!("{text}");
    }
}

pub fn warn(text: &str) {
    println!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}

pub fn success(text: &str) {
    println!("{}", text.green());
}

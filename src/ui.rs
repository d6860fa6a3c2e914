//! Console prompts and output for the interactive shell.
//!
//! Every prompt re-asks on invalid input and treats end-of-input (EOF) as a
//! polite "no"/exit so piped stdin can never wedge the loop.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::config::{Config, Preferences};

const MENU_WIDTH: usize = 60;
const SEPARATOR_CHAR: char = '=';
const MAX_DISPLAY_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterText,
    SampleFile,
    Exit,
}

fn separator() -> String {
    SEPARATOR_CHAR.to_string().repeat(MENU_WIDTH)
}

pub fn show_welcome() {
    println!("{}", separator());
    println!("{}", "WELCOME TO THE WORD CLOUD GENERATOR".bold());
    println!("{}", separator());
    println!("\nThis tool helps you visualize text data as word clouds.");
    println!("Let's get started!\n");
}

pub fn show_goodbye() {
    println!("{}", separator());
    println!("{}", "THANK YOU FOR USING THE WORD CLOUD GENERATOR!".bold());
    println!("{}", separator());
    println!("Goodbye!\n");
}

pub fn show_message(message: &str) {
    println!("{} {message}", "[INFO]".green());
}

pub fn show_error(message: &str) {
    println!("{} {message}", "[ERROR]".red());
}

pub fn show_processing_step(step: &str, count: usize) {
    show_message(&format!("{step} complete. Total items: {count}"));
}

pub fn show_word_count_info(unique_words: usize) {
    show_message(&format!("Found {unique_words} unique words after filtering."));
}

pub fn show_top_words(frequencies: &[(String, usize)]) {
    println!("{}", separator());
    println!("TOP {MAX_DISPLAY_WORDS} WORDS");
    println!("{}", separator());

    if frequencies.is_empty() {
        println!("No words to display.");
        return;
    }

    for (i, (word, count)) in frequencies.iter().take(MAX_DISPLAY_WORDS).enumerate() {
        println!("{}. {word}: {count}", i + 1);
    }
    println!("{}", separator());
}

/// Read one line, trimmed. `None` means stdin is exhausted.
fn read_line_opt() -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    read_line_opt()
}

/// Show the main menu until a valid choice (or EOF, which exits).
pub fn main_menu_choice() -> io::Result<MenuChoice> {
    loop {
        println!("{}", separator());
        println!("{:^width$}", "MAIN MENU", width = MENU_WIDTH);
        println!("{}", separator());
        println!("1. Enter text directly");
        println!("2. Choose from sample files");
        println!("3. Exit");
        println!("{}", separator());

        let Some(input) = prompt("Enter your choice (1-3): ")? else {
            return Ok(MenuChoice::Exit);
        };
        match parse_menu_choice(&input) {
            Some(choice) => return Ok(choice),
            None => show_error("Invalid choice. Please enter a number between 1 and 3."),
        }
    }
}

/// Multi-line text entry, terminated by an empty line.
pub fn read_text_input() -> io::Result<String> {
    println!("\n[INPUT] Please paste or type your text. Press Enter twice to finish:");
    let mut lines = Vec::new();
    loop {
        match read_line_opt()? {
            Some(line) if !line.is_empty() => lines.push(line),
            _ => break,
        }
    }
    Ok(lines.join("\n"))
}

/// Numbered file picker; `b` (or EOF) goes back.
pub fn select_file(files: &[String]) -> io::Result<Option<String>> {
    if files.is_empty() {
        show_message("No files available for selection.");
        return Ok(None);
    }

    loop {
        println!("{}", separator());
        println!("SELECT A FILE");
        println!("{}", separator());
        for (i, file) in files.iter().enumerate() {
            println!("{}. {file}", i + 1);
        }
        println!("{}", separator());

        let message = format!("Enter your choice (1-{}) or 'b' to go back: ", files.len());
        let Some(input) = prompt(&message)? else {
            return Ok(None);
        };
        match parse_file_choice(&input, files.len()) {
            Some(FileChoice::Back) => return Ok(None),
            Some(FileChoice::Index(i)) => return Ok(Some(files[i].clone())),
            None => show_error("Invalid choice. Please enter a valid number or 'b'."),
        }
    }
}

fn ask_yes_no(question: &str) -> io::Result<bool> {
    loop {
        let Some(input) = prompt(question)? else {
            return Ok(false);
        };
        match parse_yes_no(&input) {
            Some(answer) => return Ok(answer),
            None => show_error("Invalid response. Please type 'yes'/'y' or 'no'/'n'."),
        }
    }
}

pub fn ask_continue() -> io::Result<bool> {
    ask_yes_no("\nDo you want to generate another word cloud? (yes/y/no/n): ")
}

pub fn ask_customize() -> io::Result<bool> {
    ask_yes_no("\nDo you want to customize the word cloud settings? (yes/y/no/n): ")
}

pub fn ask_save() -> io::Result<bool> {
    ask_yes_no("\nDo you want to save the word cloud image? (yes/y/no/n): ")
}

/// Collect per-request customization, falling back to config defaults on
/// blank input.
pub fn prompt_preferences(config: &Config) -> io::Result<Preferences> {
    let mut preferences = Preferences::from_config(config);

    loop {
        let message = format!(
            "Enter maximum number of words to display (default: {}): ",
            config.max_words
        );
        let Some(input) = prompt(&message)? else { break };
        if input.is_empty() {
            break;
        }
        match parse_positive(&input) {
            Some(value) => {
                preferences.max_words = value;
                break;
            }
            None => show_error("Invalid input. Please enter a positive number."),
        }
    }

    let schemes = config.color_scheme_names();
    loop {
        println!("\nAvailable color schemes:");
        for (i, scheme) in schemes.iter().enumerate() {
            println!("{}. {}", i + 1, capitalize(scheme));
        }
        let message = format!(
            "Enter choice (1-{}) or leave blank for default ({}): ",
            schemes.len(),
            capitalize(&config.default_color_scheme)
        );
        let Some(input) = prompt(&message)? else { break };
        if input.is_empty() {
            break;
        }
        match parse_positive(&input).filter(|i| *i <= schemes.len()) {
            Some(i) => {
                preferences.color_scheme = schemes[i - 1].to_string();
                break;
            }
            None => show_error("Invalid choice. Please enter a valid number."),
        }
    }

    let message = format!(
        "Enter background color (e.g., 'white', 'black', 'lightblue', default: {}): ",
        config.default_background_color
    );
    if let Some(input) = prompt(&message)? {
        if !input.is_empty() {
            preferences.background_color = input;
        }
    }

    if let Some(input) = prompt("Enter a mask image path for a custom shape (optional): ")? {
        if !input.is_empty() {
            preferences.mask_path = Some(input.into());
        }
    }

    Ok(preferences)
}

/// Ask for a save filename, defaulting and normalizing the extension.
pub fn prompt_save_filename(config: &Config) -> io::Result<String> {
    let default_name = format!("wordcloud.{}", config.default_save_format);
    let message = format!(
        "Enter filename to save (e.g., 'my_wordcloud.png', default: '{default_name}'): "
    );

    let input = prompt(&message)?.unwrap_or_default();
    if input.is_empty() {
        return Ok(default_name);
    }

    let normalized = crate::samples::ensure_image_extension(&input);
    if normalized != input {
        println!("Warning: Recommended image format is .png or .jpg. Appending .png.");
    }
    Ok(normalized)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::EnterText),
        "2" => Some(MenuChoice::SampleFile),
        "3" => Some(MenuChoice::Exit),
        _ => None,
    }
}

enum FileChoice {
    Back,
    Index(usize),
}

fn parse_file_choice(input: &str, count: usize) -> Option<FileChoice> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("b") {
        return Some(FileChoice::Back);
    }
    match parse_positive(input) {
        Some(i) if i <= count => Some(FileChoice::Index(i - 1)),
        _ => None,
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_positive(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::EnterText));
        assert_eq!(parse_menu_choice(" 2 "), Some(MenuChoice::SampleFile));
        assert_eq!(parse_menu_choice("3"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("4"), None);
        assert_eq!(parse_menu_choice("two"), None);
        assert_eq!(parse_menu_choice(""), None);
    }

    #[test]
    fn file_choices() {
        assert!(matches!(parse_file_choice("b", 3), Some(FileChoice::Back)));
        assert!(matches!(parse_file_choice("B", 3), Some(FileChoice::Back)));
        assert!(matches!(
            parse_file_choice("2", 3),
            Some(FileChoice::Index(1))
        ));
        assert!(parse_file_choice("4", 3).is_none());
        assert!(parse_file_choice("0", 3).is_none());
        assert!(parse_file_choice("x", 3).is_none());
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(parse_yes_no("yes"), Some(true));
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn positive_numbers() {
        assert_eq!(parse_positive("50"), Some(50));
        assert_eq!(parse_positive(" 1 "), Some(1));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("abc"), None);
    }

    #[test]
    fn capitalization() {
        assert_eq!(capitalize("ocean"), "Ocean");
        assert_eq!(capitalize(""), "");
    }
}

//! Session orchestration: menu loop, text acquisition, pipeline, render,
//! save. Holds no processing logic of its own.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, Preferences};
use crate::render::{self, RenderOptions};
use crate::samples::SampleStore;
use crate::tokenize::{count_top, Tokenizer};
use crate::ui::{self, MenuChoice};

/// Command-line knobs that apply to every render in the session.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub font_path: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    pub scale: f32,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            font_path: None,
            rng_seed: None,
            scale: 1.0,
        }
    }
}

pub struct App {
    config: Config,
    samples: SampleStore,
    options: AppOptions,
}

impl App {
    pub fn new(config: Config, options: AppOptions) -> Self {
        let samples = SampleStore::new(config.sample_directory.clone());
        App {
            config,
            samples,
            options,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        match self.samples.create_sample_files() {
            Ok(created) if !created.is_empty() => {
                ui::show_message(&format!("Created sample files: {}", created.join(", ")));
            }
            Ok(_) => {}
            Err(err) => ui::show_error(&format!("Could not prepare sample files: {err}")),
        }

        ui::show_welcome();

        loop {
            let choice = ui::main_menu_choice()?;
            if choice == MenuChoice::Exit {
                ui::show_goodbye();
                break;
            }

            let text = self.text_for_choice(choice)?;
            if text.trim().is_empty() {
                ui::show_error("No text to process. Please try again.");
                continue;
            }

            // One bad request doesn't end the session: report and ask.
            if let Err(err) = self.process_and_render(&text) {
                ui::show_error(&format!("Error processing text: {err:#}"));
            }

            if !ui::ask_continue()? {
                ui::show_goodbye();
                break;
            }
        }

        Ok(())
    }

    fn text_for_choice(&self, choice: MenuChoice) -> Result<String> {
        match choice {
            MenuChoice::EnterText => Ok(ui::read_text_input()?),
            MenuChoice::SampleFile => self.sample_file_text(),
            MenuChoice::Exit => Ok(String::new()),
        }
    }

    fn sample_file_text(&self) -> Result<String> {
        let mut files = self.samples.list();
        if files.is_empty() {
            ui::show_message("No sample files found. Creating samples...");
            self.samples.create_sample_files()?;
            files = self.samples.list();
        }

        let Some(selected) = ui::select_file(&files)? else {
            return Ok(String::new());
        };

        let path = self.samples.path_for(&selected);
        match self.samples.read_text(&path) {
            Ok(text) => {
                ui::show_message(&format!("Loaded: {selected}"));
                Ok(text)
            }
            Err(err) => {
                // Unreadable file means "no text": report and re-prompt.
                ui::show_error(&err.to_string());
                Ok(String::new())
            }
        }
    }

    fn process_and_render(&mut self, text: &str) -> Result<()> {
        ui::show_message("Processing text...");

        let preferences = if ui::ask_customize()? {
            ui::prompt_preferences(&self.config)?
        } else {
            Preferences::from_config(&self.config)
        };

        let tokenizer = Tokenizer::from_config(&self.config);
        let tokens = tokenizer.process(text);
        ui::show_processing_step("Text cleaned", tokens.len());

        let frequencies = count_top(&tokens, preferences.max_words);
        ui::show_word_count_info(frequencies.len());

        let mut options = RenderOptions::new(&self.config, &preferences);
        options.font_path = self.options.font_path.clone();
        options.rng_seed = self.options.rng_seed;
        options.scale = self.options.scale;

        let image = render::render(&self.config, &frequencies, &options)?;
        ui::show_top_words(&frequencies);

        if ui::ask_save()? {
            let filename = ui::prompt_save_filename(&self.config)?;
            render::save_image(&image, Path::new(&filename))?;
            ui::show_message(&format!("Word cloud saved as '{filename}'"));
        }

        Ok(())
    }
}

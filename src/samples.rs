//! Sample-file bootstrapping and text file access.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Error;

const SHAKESPEARE: &str = "\
To be or not to be, that is the question: Whether 'tis nobler in the mind to suffer
the slings and arrows of outrageous fortune, or to take arms against a sea of troubles
and by opposing end them. To die, to sleep, no more; and by a sleep to say we end
the heart-ache and the thousand natural shocks that flesh is heir to: 'tis a consummation
devoutly to be wish'd. To die, to sleep; to sleep, perchance to dream, ay, there's the rub:
for in that sleep of death what dreams may come, when we have shuffled off this mortal coil,
must give us pause, there's the respect that makes calamity of so long life.
For who would bear the whips and scorns of time, the oppressor's wrong, the proud man's contumely,
the pangs of despised love, the law's delay, the insolence of office, and the spurns
that patient merit of the unworthy takes, when he himself might his quietus make
with a bare bodkin? Who would fardels bear, to grunt and sweat under a weary life,
but that the dread of something after death, the undiscovered country from whose bourn
no traveler returns, puzzles the will, and makes us rather bear those ills we have
than fly to others that we know not of?";

const TECHNOLOGY: &str = "\
Artificial intelligence is transforming the world in unprecedented ways. Machine learning
algorithms are becoming more sophisticated, enabling computers to perform tasks that once
required human intelligence. Deep learning neural networks are revolutionizing image
recognition, natural language processing, and decision making. Cloud computing provides
scalable infrastructure for AI applications. Data science combines statistics, programming,
and domain expertise to extract insights from big data. Robotics and automation are
changing manufacturing, healthcare, and service industries. Blockchain technology offers
new possibilities for secure, decentralized systems. Quantum computing promises exponential
improvements in computational power. Internet of Things connects everyday devices to
create smart environments. Cybersecurity becomes increasingly important as our digital
footprint expands. Virtual and augmented reality are creating immersive experiences.
The future of technology lies in the intersection of AI, robotics, and human creativity.";

const NATURE: &str = "\
The forest whispers secrets through rustling leaves. Ancient trees stand as silent
guardians of time, their roots deep in earth's embrace. Sunlight filters through
the canopy, creating dancing patterns on the forest floor. Birds sing melodies
that echo through the woodland. Streams babble over smooth stones, carrying
life-giving water to all creatures. The cycle of seasons brings constant change
yet eternal continuity. Spring awakens dormant life with gentle warmth. Summer
blazes with abundant growth and vibrant colors. Autumn paints the landscape in
gold and crimson before winter's peaceful slumber. Mountains reach toward the
sky, their peaks crowned with snow. Valleys cradle meadows filled with wildflowers.
Oceans pulse with ancient rhythms, waves crashing against weathered shores.
Nature teaches us about resilience, beauty, and the interconnectedness of all
living things. Every element plays a vital role in the grand symphony of life.";

const LITERATURE: &str = "\
Literature has the power to transport readers across time and space, into the minds
and hearts of characters both real and imagined. Great novels explore the human
condition through compelling narratives that resonate across generations. Poetry
distills emotion and experience into carefully crafted verses that speak to the soul.
Classic works by authors like Shakespeare, Dickens, Austen, and Tolstoy continue
to captivate readers centuries after their creation. Contemporary literature reflects
modern society's complexities, challenges, and aspirations. Short stories capture
moments of truth in concentrated form. Memoirs and biographies reveal the fascinating
lives of remarkable individuals. Science fiction imagines possible futures while
fantasy creates entirely new worlds. Mystery novels challenge readers to solve
puzzles alongside clever detectives. Romance stories celebrate the power of love
and human connection. Literary criticism helps us understand deeper meanings and
cultural significance. Reading expands our vocabulary, enhances our empathy, and
broadens our understanding of the world and ourselves.";

/// Built-in sample texts written into the sample directory on first run.
pub const SAMPLE_FILES: &[(&str, &str)] = &[
    ("shakespeare.txt", SHAKESPEARE),
    ("technology.txt", TECHNOLOGY),
    ("nature.txt", NATURE),
    ("literature.txt", LITERATURE),
];

/// Sample-directory access: creation, discovery, reading.
pub struct SampleStore {
    directory: PathBuf,
}

impl SampleStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        SampleStore {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.directory.join(filename)
    }

    /// Create the sample directory and any missing built-in sample files.
    /// Existing files are left untouched. Returns the names created.
    pub fn create_sample_files(&self) -> Result<Vec<String>, Error> {
        fs::create_dir_all(&self.directory).map_err(|source| Error::WriteFile {
            path: self.directory.clone(),
            source,
        })?;

        let mut created = Vec::new();
        for (filename, content) in SAMPLE_FILES {
            let path = self.path_for(filename);
            if path.exists() {
                continue;
            }
            match fs::write(&path, content) {
                Ok(()) => created.push(filename.to_string()),
                Err(err) => warn!(path = %path.display(), error = %err, "could not create sample"),
            }
        }

        Ok(created)
    }

    /// The `.txt` files currently in the sample directory, sorted by name.
    /// An unreadable or missing directory yields an empty list.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.directory) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "txt"))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    /// Read a UTF-8 text file in full.
    pub fn read_text(&self, path: &Path) -> Result<String, Error> {
        fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Keep a recognized image extension, otherwise append `.png`.
pub fn ensure_image_extension(filename: &str) -> String {
    let lower = filename.to_lowercase();
    if lower.ends_with(".png") || lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        filename.to_string()
    } else {
        format!("{filename}.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_samples_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path().join("samples"));

        let created = store.create_sample_files().unwrap();
        assert_eq!(created.len(), SAMPLE_FILES.len());

        // Second run finds everything in place.
        let created_again = store.create_sample_files().unwrap();
        assert!(created_again.is_empty());

        let listed = store.list();
        assert_eq!(listed.len(), SAMPLE_FILES.len());
        let mut expected: Vec<String> = SAMPLE_FILES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        expected.sort();
        assert_eq!(listed, expected);
    }

    #[test]
    fn does_not_clobber_user_edits() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path());
        store.create_sample_files().unwrap();

        let path = store.path_for("nature.txt");
        fs::write(&path, "my own nature notes").unwrap();

        store.create_sample_files().unwrap();
        assert_eq!(store.read_text(&path).unwrap(), "my own nature notes");
    }

    #[test]
    fn list_ignores_non_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path());
        fs::write(store.path_for("cloud.png"), b"not text").unwrap();
        fs::write(store.path_for("b.txt"), "b").unwrap();
        fs::write(store.path_for("a.txt"), "a").unwrap();

        assert_eq!(store.list(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_directory_lists_empty() {
        let store = SampleStore::new("/no/such/directory");
        assert!(store.list().is_empty());
    }

    #[test]
    fn read_missing_file_reports_path() {
        let store = SampleStore::new("/no/such/directory");
        let err = store.read_text(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }

    #[test]
    fn save_filename_extension() {
        assert_eq!(ensure_image_extension("cloud.png"), "cloud.png");
        assert_eq!(ensure_image_extension("cloud.JPG"), "cloud.JPG");
        assert_eq!(ensure_image_extension("cloud.jpeg"), "cloud.jpeg");
        assert_eq!(ensure_image_extension("cloud"), "cloud.png");
        assert_eq!(ensure_image_extension("cloud.bmp"), "cloud.bmp.png");
    }
}

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

// Only used during testing so no need to return result
pub fn create_report(rows: Vec<Vec<&'static str>>) -> String {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(vec![]);
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

fn count_lines(text: &str) -> HashMap<&str, usize> {
    text.lines()
        .filter(|line| !line.is_empty())
        .fold(HashMap::new(), |mut acc, line| {
            *acc.entry(line).or_insert(0) += 1;
            acc
        })
}

// Error logs follow directory enumeration order, which is not stable across platforms. This
// compares them line by line regardless of order so tests are not flaky
pub fn assert_unsorted_eq(s1: &str, s2: &str) {
    let sut1 = count_lines(s1);
    let sut2 = count_lines(s2);
    if sut1.len() != sut2.len() {
        panic!("texts do not contain the same distinct lines:\n{}\n---\n{}", s1, s2);
    }

    sut1.iter().for_each(|(line, count)| match sut2.get(line) {
        Some(other) => assert_eq!(count, other, "line {:?} repeated differently", line),
        None => panic!("line {:?} not found in both texts", line),
    })
}

/// A throwaway input directory laid out the way a run expects it, plus a sibling output
/// directory that does not exist yet.
pub struct InputTree {
    root: TempDir,
}

impl InputTree {
    pub fn new(products: &str, salesmen: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("input");
        fs::create_dir_all(input.join("sales")).unwrap();
        fs::write(input.join("products.csv"), products).unwrap();
        fs::write(input.join("salesmen_info.csv"), salesmen).unwrap();
        Self { root }
    }

    pub fn with_sale(self, name: &str, contents: &str) -> Self {
        fs::write(self.sales_dir().join(name), contents).unwrap();
        self
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.path().join("input")
    }

    pub fn sales_dir(&self) -> PathBuf {
        self.input_dir().join("sales")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("output")
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

pub fn read_output(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

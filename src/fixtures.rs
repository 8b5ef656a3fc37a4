//! Test fixture generator
//!
//! Writes a pseudo-random products file, salesmen file and one sales file
//! per salesperson, in the same formats the report pipeline reads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::domain::DocumentType;
use crate::parser::FIELD_DELIMITER;

const FIRST_NAMES: [&str; 5] = ["Juan", "Maria", "Carlos", "Ana", "Luis"];
const LAST_NAMES: [&str; 5] = ["Gomez", "Lopez", "Martinez", "Rodriguez", "Perez"];

/// First document number handed out; later salespeople count up from here
const FIRST_DOCUMENT_NUMBER: u64 = 1000;

/// How much data to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePlan {
    pub products: u32,
    pub salesmen: u32,
    /// Each sales file gets between 1 and this many lines
    pub max_sales_per_salesman: u32,
    /// Each line sells between 1 and this many units
    pub max_quantity: u64,
    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for FixturePlan {
    fn default() -> Self {
        Self {
            products: 10,
            salesmen: 5,
            max_sales_per_salesman: 5,
            max_quantity: 10,
            seed: None,
        }
    }
}

/// Paths written by one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFixtures {
    pub products_file: PathBuf,
    pub salesmen_file: PathBuf,
    pub sales_files: Vec<PathBuf>,
}

pub struct FixtureGenerator {
    plan: FixturePlan,
    rng: StdRng,
}

impl FixtureGenerator {
    pub fn new(plan: FixturePlan) -> Self {
        let rng = match plan.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { plan, rng }
    }

    /// Write all fixture files where `config` expects to read them
    pub fn write_all(&mut self, config: &Config) -> io::Result<GeneratedFixtures> {
        fs::create_dir_all(&config.data_dir)?;

        let products_file = config.products_path();
        fs::write(&products_file, self.products_file())?;

        let salesmen = self.salesmen();
        let salesmen_file = config.salesmen_path();
        let salesmen_text: String = salesmen
            .iter()
            .map(|s| {
                format!(
                    "{}{d}{}{d}{}{d}{}\n",
                    s.document_type,
                    s.document_number,
                    s.first_name,
                    s.last_name,
                    d = FIELD_DELIMITER
                )
            })
            .collect();
        fs::write(&salesmen_file, salesmen_text)?;

        let mut sales_files = Vec::with_capacity(salesmen.len());
        for salesman in &salesmen {
            let path = sales_file_path(&config.data_dir, &config.sales_file_prefix, salesman);
            fs::write(&path, self.sales_file(salesman))?;
            sales_files.push(path);
        }

        tracing::info!(
            products = self.plan.products,
            salesmen = salesmen.len(),
            dir = %config.data_dir.display(),
            "Fixture files generated"
        );

        Ok(GeneratedFixtures {
            products_file,
            salesmen_file,
            sales_files,
        })
    }

    /// `id;Producto{id};price` with price uniform in [1, 101)
    fn products_file(&mut self) -> String {
        (1..=self.plan.products)
            .map(|id| {
                let price: f64 = self.rng.gen::<f64>() * 100.0 + 1.0;
                format!("{id}{d}Producto{id}{d}{price}\n", d = FIELD_DELIMITER)
            })
            .collect()
    }

    fn salesmen(&mut self) -> Vec<GeneratedSalesman> {
        (0..self.plan.salesmen)
            .map(|i| GeneratedSalesman {
                document_type: if self.rng.gen_bool(0.5) {
                    DocumentType::NationalId
                } else {
                    DocumentType::MinorId
                },
                document_number: FIRST_DOCUMENT_NUMBER + u64::from(i),
                first_name: FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())],
                last_name: LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())],
            })
            .collect()
    }

    /// Header line, then 1..=max_sales_per_salesman `productId;quantity` lines
    fn sales_file(&mut self, salesman: &GeneratedSalesman) -> String {
        let mut text = format!(
            "{}{}{}\n",
            salesman.document_type, FIELD_DELIMITER, salesman.document_number
        );
        let lines = self.rng.gen_range(1..=self.plan.max_sales_per_salesman.max(1));
        for _ in 0..lines {
            let product_id = self.rng.gen_range(1..=self.plan.products.max(1));
            let quantity = self.rng.gen_range(1..=self.plan.max_quantity.max(1));
            text.push_str(&format!("{product_id}{FIELD_DELIMITER}{quantity}\n"));
        }
        text
    }
}

struct GeneratedSalesman {
    document_type: DocumentType,
    document_number: u64,
    first_name: &'static str,
    last_name: &'static str,
}

/// `{prefix}{docType}_{docNumber}.txt`
fn sales_file_path(dir: &Path, prefix: &str, salesman: &GeneratedSalesman) -> PathBuf {
    dir.join(format!(
        "{prefix}{}_{}.txt",
        salesman.document_type, salesman.document_number
    ))
}

#![allow(dead_code)]

use std::fmt::Write as _;
use std::sync::Arc;

use penguin_explorer::core::Dataset;
use penguin_explorer::source::parse_dataset;

pub const HEADER: &str =
    "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year";

/// Species sizes of the Palmer dataset (152 + 68 + 124 = 344 rows).
pub const SPECIES_SIZES: [(&str, &str, usize); 3] = [
    ("Adelie", "Torgersen", 152),
    ("Chinstrap", "Dream", 68),
    ("Gentoo", "Biscoe", 124),
];

/// `(species, row index)` pairs whose four measurements are `NA`.
pub const MISSING_ROWS: [(&str, usize); 2] = [("Adelie", 3), ("Gentoo", 0)];

pub const TOTAL_RECORDS: usize = 344;
pub const COMPLETE_RECORDS: usize = 342;

/// Deterministic penguin-shaped CSV with 344 rows and 2 incomplete ones.
pub fn scenario_csv() -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for (species, island, size) in SPECIES_SIZES {
        for i in 0..size {
            let sex = if i % 11 == 5 {
                "NA"
            } else if i % 2 == 0 {
                "male"
            } else {
                "female"
            };
            let year = 2007 + (i % 3);
            if MISSING_ROWS.contains(&(species, i)) {
                let _ = writeln!(csv, "{species},{island},NA,NA,NA,NA,NA,{year}");
                continue;
            }
            let (bill_length, bill_depth, flipper, mass) = measurements(species, i);
            let _ = writeln!(
                csv,
                "{species},{island},{bill_length},{bill_depth},{flipper},{mass},{sex},{year}"
            );
        }
    }
    csv
}

fn measurements(species: &str, i: usize) -> (f64, f64, f64, f64) {
    let i = i as f64;
    match species {
        "Adelie" => (
            36.0 + (i % 12.0) * 0.5,
            17.0 + (i % 8.0) * 0.25,
            181.0 + (i % 15.0),
            3000.0 + (i % 20.0) * 50.0,
        ),
        "Chinstrap" => (
            46.0 + (i % 10.0) * 0.6,
            17.5 + (i % 7.0) * 0.3,
            190.0 + (i % 14.0),
            3300.0 + (i % 18.0) * 60.0,
        ),
        _ => (
            45.0 + (i % 13.0) * 0.5,
            14.0 + (i % 9.0) * 0.2,
            210.0 + (i % 16.0),
            4500.0 + (i % 24.0) * 75.0,
        ),
    }
}

pub fn scenario_dataset() -> Dataset {
    parse_dataset(scenario_csv().as_bytes()).expect("scenario csv parses")
}

pub fn shared_scenario_dataset() -> Arc<Dataset> {
    Arc::new(scenario_dataset())
}

/// Small hand-written dataset for focused assertions.
pub fn tiny_csv() -> &'static str {
    "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
     Adelie,Torgersen,39.1,18.7,181,3750,male,2007\n\
     Adelie,Torgersen,39.5,17.4,186,3800,female,2007\n\
     Adelie,Torgersen,NA,NA,NA,NA,NA,2007\n\
     Gentoo,Biscoe,46.1,13.2,211,4500,female,2007\n\
     Chinstrap,Dream,46.5,17.9,192,3500,female,2007\n"
}

pub fn tiny_dataset() -> Dataset {
    parse_dataset(tiny_csv().as_bytes()).expect("tiny csv parses")
}

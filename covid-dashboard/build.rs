use std::env;
use std::fs;
use std::path::Path;

// Minimal built-in sample used when the fetched fixtures are absent, so the
// dashboard builds and renders out of the box. Run `cov-cli fetch` to
// replace these with the full dataset.
const SAMPLE_OBSERVATIONS: &str = "\
iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,icu_patients,hosp_patients,new_tests,total_tests,total_hosp_patients,total_icu_patients
FRA,Europe,France,2020-03-01,130,30,2,0,,,1000,5000,,
FRA,Europe,France,2020-03-02,191,61,3,1,,,1200,6200,,
FRA,Europe,France,2020-03-03,204,13,4,1,,,1300,7500,,
ITA,Europe,Italy,2020-03-01,1694,573,34,12,140,455,,23345,455,140
ITA,Europe,Italy,2020-03-02,2036,342,52,18,166,508,4325,27670,963,306
ITA,Europe,Italy,2020-03-03,2502,466,79,27,229,654,4874,32544,1617,535
JPN,Asia,Japan,2020-03-01,243,9,5,0,,,130,2500,,
JPN,Asia,Japan,2020-03-02,254,11,6,1,,,150,2650,,
USA,North America,United States,2020-03-01,30,6,1,0,,,,,,
USA,North America,United States,2020-03-02,53,23,6,5,,,,,,
";

const SAMPLE_LOCATIONS: &str = "\
location,iso_code,continent
France,FRA,Europe
Italy,ITA,Europe
Japan,JPN,Asia
United States,USA,North America
";

const SAMPLE_CODEBOOK: &str = "\
column,description,source
date,Date of observation,Our World in Data
continent,Continent of the geographical location,Our World in Data
location,Geographical location,Our World in Data
";

fn copy_or_fallback(out_dir: &str, name: &str, fallback: &str) {
    let src = Path::new("../fixtures").join(name);
    let dest = Path::new(out_dir).join(name);
    if src.exists() {
        fs::copy(&src, &dest).unwrap();
    } else {
        fs::write(&dest, fallback).unwrap();
    }
    println!("cargo:rerun-if-changed=../fixtures/{}", name);
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    copy_or_fallback(&out_dir, "observations.csv", SAMPLE_OBSERVATIONS);
    copy_or_fallback(&out_dir, "locations.csv", SAMPLE_LOCATIONS);
    copy_or_fallback(&out_dir, "codebook.csv", SAMPLE_CODEBOOK);
}

use regex::Regex;
use std::sync::LazyLock;

use crate::models::LocationHints;

static AREA_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3,6}").expect("area code pattern is valid"));

const LOCALITY_LEXICON: &[&str] = &[
    "mumbai",
    "delhi",
    "new delhi",
    "bangalore",
    "bengaluru",
    "chennai",
    "kolkata",
    "hyderabad",
    "pune",
    "ahmedabad",
    "jaipur",
    "lucknow",
    "kanpur",
    "nagpur",
    "indore",
    "thane",
    "bhopal",
    "patna",
    "vadodara",
    "ghaziabad",
    "ludhiana",
    "agra",
    "nashik",
    "noida",
    "gurgaon",
    "gurugram",
    "faridabad",
    "surat",
    "rajkot",
    "kochi",
    "coimbatore",
    "madurai",
    "chandigarh",
    "guwahati",
    "bhubaneswar",
    "visakhapatnam",
    "vijayawada",
    "mysore",
    "navi mumbai",
    "andheri",
    "bandra",
    "borivali",
    "dadar",
    "powai",
    "dwarka",
    "rohini",
    "saket",
    "whitefield",
    "koramangala",
    "salt lake",
    "howrah",
    "secunderabad",
];

// `city` does not affect the result.
pub fn derive_location_hints(isp: &str, org: &str, _city: &str) -> LocationHints {
    let text = format!("{} {}", isp, org).to_lowercase();

    let districts = LOCALITY_LEXICON
        .iter()
        .filter(|name| text.contains(*name))
        .map(|name| name.to_string())
        .collect();

    let areas = first_digit_run(&text).into_iter().collect();

    LocationHints {
        districts,
        areas,
        localities: Vec::new(),
    }
}

fn first_digit_run(text: &str) -> Option<String> {
    AREA_CODE
        .find(text)
        .map(|found| found.as_str().to_string())
}

// Domain model: a single row of the country statistics table.

use serde::{Deserialize, Serialize};

/// One country record. `internet_users` and `adult_literacy_rate` are
/// percentages; `None` means the value is unknown, which is not the same
/// thing as zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub internet_users: Option<f64>,
    #[serde(default)]
    pub adult_literacy_rate: Option<f64>,
}

impl Country {
    /// Start building a record from its two mandatory fields.
    pub fn builder(code: impl Into<String>, name: impl Into<String>) -> CountryBuilder {
        CountryBuilder {
            code: code.into(),
            name: name.into(),
            internet_users: None,
            adult_literacy_rate: None,
        }
    }
}

/// Builder used by the add flow and by the seeder.
#[derive(Debug, Clone)]
pub struct CountryBuilder {
    code: String,
    name: String,
    internet_users: Option<f64>,
    adult_literacy_rate: Option<f64>,
}

impl CountryBuilder {
    pub fn with_internet_users(mut self, value: Option<f64>) -> Self {
        self.internet_users = value;
        self
    }

    pub fn with_adult_literacy_rate(mut self, value: Option<f64>) -> Self {
        self.adult_literacy_rate = value;
        self
    }

    pub fn build(self) -> Country {
        Country {
            code: self.code,
            name: self.name,
            internet_users: self.internet_users,
            adult_literacy_rate: self.adult_literacy_rate,
        }
    }
}

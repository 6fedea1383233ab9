// UI layer: the numbered menu loop and the six actions it dispatches to.
// All terminal I/O goes through a `Prompter`; all persistence goes through
// a `CountryDao`. Both are handed in by `main`.

use crate::dao::CountryDao;
use crate::error::PromptError;
use crate::model::Country;
use crate::prompt::{Prompter, NUMERIC_ONLY};
use log::{error, info, warn};
use std::io::{BufRead, Write};

pub const INTERNET_USERS: &str = "Internet Users";
pub const ADULT_LITERACY: &str = "Adult Literacy";

/// The entries of the main menu, numbered 1 to 6 as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewTable,
    ViewStatistics,
    AddCountry,
    EditCountry,
    DeleteCountry,
    Quit,
}

impl MenuChoice {
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::ViewTable),
            2 => Some(MenuChoice::ViewStatistics),
            3 => Some(MenuChoice::AddCountry),
            4 => Some(MenuChoice::EditCountry),
            5 => Some(MenuChoice::DeleteCountry),
            6 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

const MENU: &str = "\n\n1. View data table\n2. View statistics\n3. Add a country\n\
                    4. Edit a country\n5. Delete a country\n6. Quit\n";

/// Main interactive menu. Runs until the user picks "Quit" (`Ok`) or the
/// input stream fails (`Err` with a fatal [`PromptError`]). Recoverable
/// errors raised by an action are reported and the menu is shown again.
pub fn main_menu<D, R, W>(dao: &D, prompter: &mut Prompter<R, W>) -> Result<(), PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    loop {
        write!(prompter.writer(), "{MENU}")?;
        let line = prompter.ask("Choose:")?;

        let outcome = match line.parse::<i32>() {
            Err(_) => Err(PromptError::Input(NUMERIC_ONLY.to_string())),
            Ok(n) => match MenuChoice::from_number(n) {
                None => {
                    prompter.warn("The value you entered is not between the 1-6 range.")?;
                    continue;
                }
                Some(MenuChoice::Quit) => {
                    info!("quit requested");
                    return Ok(());
                }
                Some(choice) => run_action(choice, dao, prompter),
            },
        };

        if let Err(e) = outcome {
            if e.is_fatal() {
                error!("{e}");
                return Err(e);
            }
            warn!("action failed: {e}");
            prompter.error(&e.to_string())?;
        }
    }
}

fn run_action<D, R, W>(
    choice: MenuChoice,
    dao: &D,
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    match choice {
        MenuChoice::ViewTable => view_countries(dao, prompter.writer()),
        MenuChoice::ViewStatistics => view_statistics(dao, prompter.writer()),
        MenuChoice::AddCountry => add_country(dao, prompter),
        MenuChoice::EditCountry => edit_country(dao, prompter),
        MenuChoice::DeleteCountry => delete_country(dao, prompter),
        MenuChoice::Quit => Ok(()),
    }
}

/// Two decimals, or `--` for an unknown value.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "--".to_string(),
    }
}

pub fn format_header() -> String {
    format!(
        "{:<8}{:<40}{:<20}{}",
        "Code", "Country", INTERNET_USERS, "Literacy"
    )
}

pub fn format_row(country: &Country) -> String {
    format!(
        "{:<8}{:<40}{:<20}{}",
        country.code,
        country.name,
        format_percent(country.internet_users),
        format_percent(country.adult_literacy_rate)
    )
}

/// Print every row in the order the DAO returns them.
pub fn view_countries<D: CountryDao, W: Write>(dao: &D, out: &mut W) -> Result<(), PromptError> {
    let countries = dao.fetch_all()?;
    let header = format_header();
    writeln!(out, "\n{header}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    for country in &countries {
        writeln!(out, "{}", format_row(country))?;
    }
    Ok(())
}

fn internet_users(c: &Country) -> Option<f64> {
    c.internet_users
}

fn adult_literacy(c: &Country) -> Option<f64> {
    c.adult_literacy_rate
}

fn format_extreme(label: &str, country: Option<Country>, value: fn(&Country) -> Option<f64>) -> String {
    match country.as_ref().and_then(|c| value(c).map(|v| (c, v))) {
        Some((c, v)) => format!("{label}: {} --> {v:.2}", c.name),
        None => format!("{label}: no data available"),
    }
}

/// Min/max of both metrics and the correlation coefficient between them.
pub fn view_statistics<D: CountryDao, W: Write>(dao: &D, out: &mut W) -> Result<(), PromptError> {
    let coefficient = dao.correlation_coefficient()?;

    let lines = [
        format_extreme(
            "Country with greatest internet usage percent",
            dao.max_internet_users()?,
            internet_users,
        ),
        format_extreme(
            "Country with least internet usage percent",
            dao.min_internet_users()?,
            internet_users,
        ),
        format_extreme(
            "Country with greatest adult literacy percent",
            dao.max_adult_literacy()?,
            adult_literacy,
        ),
        format_extreme(
            "Country with least adult literacy percent",
            dao.min_adult_literacy()?,
            adult_literacy,
        ),
    ];
    for line in &lines {
        writeln!(out, "\n{line}")?;
    }

    let label = "Correlation coefficient (Internet Usage <-> Adult Literacy)";
    match coefficient {
        Some(r) => writeln!(out, "\n{label}: {r:.2}")?,
        None => writeln!(out, "\n{label}: not available")?,
    }
    Ok(())
}

/// Prompts for a code until it matches a stored country. There is no way
/// to back out other than entering an existing code.
pub fn existing_country<D, R, W>(dao: &D, prompter: &mut Prompter<R, W>) -> Result<Country, PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    loop {
        let code = prompter.country_code()?;
        if let Some(country) = dao.fetch_by_code(&code)? {
            return Ok(country);
        }
        prompter.warn(
            "The country code you've entered doesn't reference a country from the database. Try again.",
        )?;
    }
}

pub fn add_country<D, R, W>(dao: &D, prompter: &mut Prompter<R, W>) -> Result<(), PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    let code = prompter.country_code()?;
    let name = prompter.country_name()?;
    let internet_users = prompter.percent(INTERNET_USERS, "enter")?;
    let adult_literacy = prompter.percent(ADULT_LITERACY, "enter")?;

    let country = Country::builder(code, name)
        .with_internet_users(internet_users)
        .with_adult_literacy_rate(adult_literacy)
        .build();
    dao.add(&country)?;
    info!("added country {}", country.code);
    prompter.say(&format!("Country {} added.", country.code))
}

/// Both metrics are always re-entered; declining a prompt clears the
/// stored value.
pub fn edit_country<D, R, W>(dao: &D, prompter: &mut Prompter<R, W>) -> Result<(), PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    let mut country = existing_country(dao, prompter)?;

    if prompter.confirm("Do you want to edit the country name?")? {
        country.name = prompter.country_name()?;
    }
    let internet_users = prompter.percent(INTERNET_USERS, "edit")?;
    let adult_literacy = prompter.percent(ADULT_LITERACY, "edit")?;
    country.internet_users = internet_users;
    country.adult_literacy_rate = adult_literacy;

    dao.update(&country)?;
    info!("updated country {}", country.code);
    prompter.say(&format!("Country {} updated.", country.code))
}

pub fn delete_country<D, R, W>(dao: &D, prompter: &mut Prompter<R, W>) -> Result<(), PromptError>
where
    D: CountryDao,
    R: BufRead,
    W: Write,
{
    let country = existing_country(dao, prompter)?;
    dao.delete(&country)?;
    info!("deleted country {}", country.code);
    prompter.say(&format!("Country {} deleted.", country.code))
}

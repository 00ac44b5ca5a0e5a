//! Interactive collection of the city, month and day filters.

use std::io::{self, BufRead, Write};

use bikeshare_core::{
    CitySelection, FilterSelection, MonthFilter, SelectionError, parse_cities, parse_day,
    parse_month,
};
use tracing::debug;

use super::report::SEPARATOR;

const GREETING: &str = "\nHello! Let's explore some US bikeshare data!\n\n\
We will start by filtering the data. If you want to compare two cities, enter their names \
separated by a comma. If you want to explore a single city just type its name.\n";
const CITY_PROMPT: &str = "Which city would you like to explore? (Chicago, New York City, Washington): ";
const MONTH_PROMPT: &str = "Which month should I filter by? (all, January, February, ... , June): ";
const DAY_PROMPT: &str = "Which day of week should I filter by? (all, Monday, Tuesday, ... , Sunday): ";

/// Field currently being asked for, carrying the answers accepted so far.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptState {
    City,
    Month(CitySelection),
    Day(CitySelection, MonthFilter),
}

#[derive(Debug)]
enum Step {
    Ask(PromptState),
    Done(FilterSelection),
}

impl PromptState {
    const fn prompt(&self) -> &'static str {
        match self {
            Self::City => CITY_PROMPT,
            Self::Month(_) => MONTH_PROMPT,
            Self::Day(..) => DAY_PROMPT,
        }
    }

    const fn field(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Month(_) => "month",
            Self::Day(..) => "day",
        }
    }

    fn advance(&self, answer: &str) -> Result<Step, SelectionError> {
        match self {
            Self::City => parse_cities(answer).map(|cities| Step::Ask(Self::Month(cities))),
            Self::Month(cities) => {
                parse_month(answer).map(|month| Step::Ask(Self::Day(cities.clone(), month)))
            }
            Self::Day(cities, month) => parse_day(answer).map(|day| {
                Step::Done(FilterSelection {
                    cities: cities.clone(),
                    month: *month,
                    day,
                })
            }),
        }
    }
}

/// Greets the user and asks for cities, month and day until each answer is
/// valid.
///
/// Returns `Ok(None)` when `input` ends before all three are collected.
///
/// # Errors
/// Returns any I/O error raised while reading or writing.
///
/// # Examples
/// ```
/// use bikeshare_cli::cli::select_filters;
/// use bikeshare_core::{City, MonthFilter};
///
/// let mut input = "atlantis\nChicago\nJanuary\nall\n".as_bytes();
/// let mut output = Vec::new();
/// let selection = select_filters(&mut input, &mut output)?.expect("all fields answered");
/// assert_eq!(selection.cities.cities(), &[City::Chicago]);
/// assert_eq!(selection.month.to_string(), "january");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn select_filters<R, W>(input: &mut R, output: &mut W) -> io::Result<Option<FilterSelection>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(output, "{GREETING}")?;
    let mut state = PromptState::City;
    let mut answer = String::new();
    loop {
        write!(output, "{}", state.prompt())?;
        output.flush()?;
        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            debug!(field = state.field(), "input closed before filters were complete");
            return Ok(None);
        }
        match state.advance(&answer) {
            Ok(Step::Ask(next)) => state = next,
            Ok(Step::Done(selection)) => {
                writeln!(output, "{SEPARATOR}")?;
                return Ok(Some(selection));
            }
            Err(err) => {
                debug!(field = state.field(), code = %err.code(), "rejected answer");
                writeln!(output, "Sorry, {err}.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bikeshare_core::City;
    use rstest::rstest;

    fn collect(input: &str) -> (Option<FilterSelection>, String) {
        let mut output = Vec::new();
        let selection =
            select_filters(&mut input.as_bytes(), &mut output).expect("in-memory i/o must work");
        let text = String::from_utf8(output).expect("prompts are UTF-8");
        (selection, text)
    }

    #[test]
    fn valid_answers_produce_selection() {
        let (selection, text) = collect("new york city, washington\nMARCH\n Friday \n");
        let selection = selection.expect("every field was answered");
        assert_eq!(
            selection.cities.cities(),
            &[City::NewYorkCity, City::Washington]
        );
        assert_eq!(selection.month.to_string(), "march");
        assert_eq!(selection.day.to_string(), "friday");
        assert!(text.starts_with("\nHello! Let's explore some US bikeshare data!"));
        assert!(text.ends_with(&format!("{SEPARATOR}\n")));
    }

    #[rstest]
    #[case::unknown_city("boston\nchicago\nall\nall\n", CITY_PROMPT, "unknown city `boston`")]
    #[case::three_cities(
        "chicago,washington,new york city\nchicago\nall\nall\n",
        CITY_PROMPT,
        "got 3"
    )]
    #[case::july("chicago\njuly\nall\nall\n", MONTH_PROMPT, "unknown month `july`")]
    #[case::abbreviated_day("chicago\nall\nsun\nall\n", DAY_PROMPT, "unknown day `sun`")]
    fn invalid_answer_reasks_same_field(
        #[case] input: &str,
        #[case] prompt: &str,
        #[case] hint: &str,
    ) {
        let (selection, text) = collect(input);
        assert!(selection.is_some());
        assert_eq!(text.matches(prompt).count(), 2);
        assert!(text.contains(hint), "missing hint `{hint}` in {text:?}");
    }

    #[rstest]
    #[case::nothing("", CITY_PROMPT)]
    #[case::after_city("chicago\n", MONTH_PROMPT)]
    #[case::after_month("chicago\njune\n", DAY_PROMPT)]
    fn end_of_input_stops_collection(#[case] input: &str, #[case] last_prompt: &str) {
        let (selection, text) = collect(input);
        assert!(selection.is_none());
        assert!(text.ends_with(last_prompt));
    }

    #[test]
    fn state_machine_walks_fields_in_order() {
        let Ok(Step::Ask(month)) = PromptState::City.advance("Chicago") else {
            panic!("city answer must advance to month");
        };
        assert_eq!(month.field(), "month");
        let Ok(Step::Ask(day)) = month.advance("all") else {
            panic!("month answer must advance to day");
        };
        assert_eq!(day.field(), "day");
        assert!(matches!(day.advance("monday"), Ok(Step::Done(_))));
        assert!(day.advance("someday").is_err());
    }
}

//! Server-rendered HTML pages.
//!
//! All user-supplied text goes through [`esc`] before it reaches the page.

use std::borrow::Cow;

use axum::response::Html;
use roster_core::{
  FieldError,
  dto::{CountryResponse, PersonResponse},
  entity::Gender,
  query::{SearchField, SortField, SortOrder},
};
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use crate::form::PersonForm;

pub const LISTING_PATH: &str = "/persons";

/// Date format used in the listing table.
const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

fn esc(s: &str) -> Cow<'_, str> {
  quick_xml::escape::escape(s)
}

fn layout(title: &str, body: &str) -> Html<String> {
  Html(format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<header><a href="{LISTING_PATH}">Persons</a></header>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
    title = esc(title),
  ))
}

pub fn error_page(message: &str) -> Html<String> {
  let lines: String = message
    .lines()
    .map(|l| format!("<p>{}</p>\n", esc(l)))
    .collect();
  layout("Error", &format!(r#"<div class="error">{lines}</div>"#))
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// Current state of the listing controls, echoed back into the page.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
  pub search_by:     &'a str,
  pub search_string: &'a str,
  pub sort_by:       &'a str,
  pub sort_order:    SortOrder,
}

impl Listing<'_> {
  /// Link that re-sorts by `field`, flipping the order when `field` is
  /// already the active column.
  fn sort_href(&self, field: SortField) -> String {
    let active = self.sort_by.parse::<SortField>().ok() == Some(field);
    let order = if active { self.sort_order.toggled() } else { SortOrder::Asc };
    let query = url::form_urlencoded::Serializer::new(String::new())
      .append_pair("searchBy", self.search_by)
      .append_pair("searchString", self.search_string)
      .append_pair("sortBy", field.as_ref())
      .append_pair("sortOrder", order.as_ref())
      .finish();
    format!("{LISTING_PATH}/index?{query}")
  }

  fn header_cell(&self, field: SortField) -> String {
    let marker = match self.sort_by.parse::<SortField>() {
      Ok(f) if f == field => match self.sort_order {
        SortOrder::Asc => " &#9650;",
        SortOrder::Desc => " &#9660;",
      },
      _ => "",
    };
    format!(
      r#"<th><a href="{href}">{label}</a>{marker}</th>"#,
      href = esc(&self.sort_href(field)),
      label = field.label(),
    )
  }
}

fn opt(v: &Option<String>) -> Cow<'_, str> {
  v.as_deref().map(esc).unwrap_or_default()
}

fn person_row(p: &PersonResponse) -> String {
  let id = p.person_id;
  format!(
    r#"<tr>
<td>{name}</td>
<td>{email}</td>
<td>{dob}</td>
<td>{age}</td>
<td>{gender}</td>
<td>{country}</td>
<td>{address}</td>
<td>{news}</td>
<td><a href="{LISTING_PATH}/edit/{id}">Edit</a> <a href="{LISTING_PATH}/delete/{id}">Delete</a></td>
</tr>
"#,
    name = opt(&p.person_name),
    email = opt(&p.email),
    dob = p
      .date_of_birth
      .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
      .unwrap_or_default(),
    age = p.age.map(|a| a.to_string()).unwrap_or_default(),
    gender = p.gender.map(Gender::label).unwrap_or_default(),
    country = opt(&p.country),
    address = opt(&p.address),
    news = if p.receive_news_letters { "Yes" } else { "No" },
  )
}

pub fn index(persons: &[PersonResponse], listing: &Listing<'_>) -> Html<String> {
  let search_options: String = SearchField::iter()
    .map(|f| {
      let selected = listing.search_by.parse::<SearchField>().ok() == Some(f);
      format!(
        r#"<option value="{value}"{sel}>{label}</option>"#,
        value = f.as_ref(),
        sel = if selected { " selected" } else { "" },
        label = f.label(),
      )
    })
    .collect();

  let headers: String =
    SortField::iter().map(|f| listing.header_cell(f)).collect();
  let rows: String = persons.iter().map(person_row).collect();

  let body = format!(
    r#"<form method="get" action="{LISTING_PATH}/index">
<select name="searchBy">{search_options}</select>
<input type="search" name="searchString" value="{search_string}">
<input type="hidden" name="sortBy" value="{sort_by}">
<input type="hidden" name="sortOrder" value="{sort_order}">
<button type="submit">Search</button>
<a href="{LISTING_PATH}/index">Clear all</a>
</form>
<p><a href="{LISTING_PATH}/create">Create Person</a></p>
<table>
<thead><tr>{headers}<th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
"#,
    search_string = esc(listing.search_string),
    sort_by = esc(listing.sort_by),
    sort_order = listing.sort_order,
  );
  layout("Persons", &body)
}

// ─── Create / edit ───────────────────────────────────────────────────────────

/// Which form is being rendered.
#[derive(Debug, Clone, Copy)]
pub enum FormPage {
  Create,
  Edit(Uuid),
}

impl FormPage {
  fn title(self) -> &'static str {
    match self {
      Self::Create => "Create Person",
      Self::Edit(_) => "Edit Person",
    }
  }

  fn action(self) -> String {
    match self {
      Self::Create => format!("{LISTING_PATH}/create"),
      Self::Edit(id) => format!("{LISTING_PATH}/edit/{id}"),
    }
  }
}

fn text_input(label: &str, name: &str, kind: &str, value: &Option<String>) -> String {
  format!(
    r#"<p><label for="{name}">{label}</label>
<input type="{kind}" id="{name}" name="{name}" value="{value}"></p>
"#,
    value = opt(value),
  )
}

pub fn person_form(
  page: FormPage,
  form: &PersonForm,
  countries: &[CountryResponse],
  errors: &[FieldError],
) -> Html<String> {
  let error_list = if errors.is_empty() {
    String::new()
  } else {
    let items: String = errors
      .iter()
      .map(|e| format!("<li>{}</li>", esc(&e.message)))
      .collect();
    format!("<ul class=\"errors\">{items}</ul>\n")
  };

  let chosen_gender = form.gender.as_deref().and_then(|g| g.parse::<Gender>().ok());
  let genders: String = Gender::iter()
    .map(|g| {
      format!(
        r#"<label><input type="radio" name="Gender" value="{g}"{checked}> {g}</label>
"#,
        checked = if chosen_gender == Some(g) { " checked" } else { "" },
      )
    })
    .collect();

  let chosen_country = form.country_id.as_deref().unwrap_or_default();
  let country_options: String = countries
    .iter()
    .map(|c| {
      let id = c.country_id.to_string();
      format!(
        r#"<option value="{id}"{sel}>{name}</option>"#,
        sel = if id == chosen_country { " selected" } else { "" },
        name = esc(&c.country_name),
      )
    })
    .collect();

  let body = format!(
    r#"{error_list}<form method="post" action="{action}">
{name}{email}{dob}<fieldset><legend>Gender</legend>
{genders}</fieldset>
<p><label for="CountryID">Country</label>
<select id="CountryID" name="CountryID"><option value="">Please Select</option>{country_options}</select></p>
<p><label for="Address">Address</label>
<textarea id="Address" name="Address">{address}</textarea></p>
<p><label><input type="checkbox" name="ReceiveNewsLetters" value="true"{news}> Receive News Letters</label></p>
<button type="submit">{title}</button>
<a href="{LISTING_PATH}">Back to Persons List</a>
</form>
"#,
    action = page.action(),
    name = text_input("Person Name", "PersonName", "text", &form.person_name),
    email = text_input("Email", "Email", "email", &form.email),
    dob = text_input("Date of Birth", "DateOfBirth", "date", &form.date_of_birth),
    address = opt(&form.address),
    news = if form.receive_news_letters.is_some() { " checked" } else { "" },
    title = page.title(),
  );
  layout(page.title(), &body)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

pub fn delete_confirm(person: &PersonResponse) -> Html<String> {
  let id = person.person_id;
  let body = format!(
    r#"<p>Are you sure you want to delete <strong>{name}</strong>?</p>
<form method="post" action="{LISTING_PATH}/delete/{id}">
<button type="submit">Delete</button>
<a href="{LISTING_PATH}">Cancel</a>
</form>
"#,
    name = opt(&person.person_name),
  );
  layout("Delete Person", &body)
}

//! Ordered selector strategies with first-match-wins evaluation.
//!
//! A [`Strategy`] is a tag name plus an attribute constraint. Strategies are
//! evaluated in the order given; the first one that matches anything decides
//! the outcome and lower-priority strategies are never consulted.

use crate::core::error::{Result, ScrapeError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone)]
pub enum AttrMatcher {
    /// Any element with the tag.
    Any,
    /// Attribute equals the value. For `class`, any single class token may match.
    Equals(&'static str, &'static str),
    /// Attribute contains a match for the regex (search, not full match).
    Pattern(&'static str, Regex),
}

impl AttrMatcher {
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        match self {
            AttrMatcher::Any => true,
            AttrMatcher::Equals(attr, expected) => {
                attr_matches(element, attr, |value| value == *expected)
            }
            AttrMatcher::Pattern(attr, re) => attr_matches(element, attr, |value| re.is_match(value)),
        }
    }
}

// `class` is a token list: the test runs on every token and on the full value.
fn attr_matches(element: &ElementRef<'_>, attr: &str, test: impl Fn(&str) -> bool) -> bool {
    let Some(value) = element.value().attr(attr) else {
        return false;
    };

    if attr == "class" {
        value.split_whitespace().any(&test) || test(value)
    } else {
        test(value)
    }
}

#[derive(Debug, Clone)]
pub struct Strategy {
    pub name: &'static str,
    pub tag: &'static str,
    pub matcher: AttrMatcher,
    selector: Selector,
}

impl Strategy {
    pub fn new(name: &'static str, tag: &'static str, matcher: AttrMatcher) -> Result<Self> {
        let selector = Selector::parse(tag)
            .map_err(|e| ScrapeError::Parse(format!("invalid tag selector '{}': {:?}", tag, e)))?;

        Ok(Self {
            name,
            tag,
            matcher,
            selector,
        })
    }

    pub fn any(name: &'static str, tag: &'static str) -> Result<Self> {
        Self::new(name, tag, AttrMatcher::Any)
    }

    pub fn equals(
        name: &'static str,
        tag: &'static str,
        attr: &'static str,
        value: &'static str,
    ) -> Result<Self> {
        Self::new(name, tag, AttrMatcher::Equals(attr, value))
    }

    pub fn pattern(
        name: &'static str,
        tag: &'static str,
        attr: &'static str,
        pattern: &str,
    ) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| ScrapeError::Parse(format!("invalid pattern '{}': {}", pattern, e)))?;
        Self::new(name, tag, AttrMatcher::Pattern(attr, re))
    }

    pub fn find_first<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&self.selector).find(|el| self.matcher.matches(el))
    }

    pub fn find_all<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&self.selector)
            .filter(|el| self.matcher.matches(el))
            .collect()
    }
}

/// First element of the first strategy that has one.
pub fn first_match<'a, 's>(
    doc: &'a Html,
    strategies: &'s [Strategy],
) -> Option<(&'s Strategy, ElementRef<'a>)> {
    strategies
        .iter()
        .find_map(|strategy| strategy.find_first(doc).map(|el| (strategy, el)))
}

/// Whole match set of the first strategy whose set is non-empty.
pub fn first_match_set<'a, 's>(
    doc: &'a Html,
    strategies: &'s [Strategy],
) -> Option<(&'s Strategy, Vec<ElementRef<'a>>)> {
    strategies.iter().find_map(|strategy| {
        let found = strategy.find_all(doc);
        if found.is_empty() {
            None
        } else {
            Some((strategy, found))
        }
    })
}

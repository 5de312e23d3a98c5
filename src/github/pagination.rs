use anyhow::Result;
use reqwest::header::{HeaderMap, LINK};

/// Lazily paginated sequence of API results.
///
/// Pages are pulled one at a time, only once the items of the previous page
/// have been consumed. The first error ends the sequence.
pub struct Paginated<'a, T> {
    fetch_page: Box<dyn FnMut() -> Result<Option<Vec<T>>> + 'a>,
    current: std::vec::IntoIter<T>,
    pages_fetched: usize,
    finished: bool,
}

impl<'a, T> Paginated<'a, T> {
    /// Build from a page source. The source returns `Ok(None)` once exhausted.
    pub fn new(fetch_page: impl FnMut() -> Result<Option<Vec<T>>> + 'a) -> Self {
        Paginated {
            fetch_page: Box::new(fetch_page),
            current: Vec::new().into_iter(),
            pages_fetched: 0,
            finished: false,
        }
    }

    /// Number of pages pulled so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<T> Iterator for Paginated<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }

            match (self.fetch_page)() {
                Ok(Some(page)) => {
                    self.pages_fetched += 1;
                    self.current = page.into_iter();
                }
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Extract the `rel="next"` URL from a `Link` response header
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });

        if is_next {
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(str::to_string)
        } else {
            None
        }
    })
}

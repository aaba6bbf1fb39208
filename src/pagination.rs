//! Page windows, sort orders and the view model used to render page links.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

/// Page size applied when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 7;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Rejected pagination parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("page index must not be negative, got {0}")]
    NegativePage(i64),

    #[error("page size must be greater than zero, got {0}")]
    NonPositiveSize(i64),

    #[error("page size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: i64, max: usize },

    #[error("page {page} of size {size} is past the last addressable row")]
    OffsetOverflow { page: i64, size: i64 },

    #[error("unknown sort column `{0}`")]
    UnknownSortColumn(String),

    #[error("unknown sort direction `{0}`")]
    UnknownSortDirection(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(value: &str) -> Result<Self, PageRequestError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(PageRequestError::UnknownSortDirection(value.to_string())),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Column an entity can be ordered by.
///
/// Implemented by a closed enum per entity so that an unknown column name is
/// rejected while parsing the request instead of being ignored by the query.
pub trait SortKey: Copy + Default {
    /// Resolves a request-level column name.
    fn from_column(name: &str) -> Option<Self>;

    /// Canonical request-level name of the column.
    fn column(self) -> &'static str;
}

/// A single sort column together with its direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sort<S> {
    pub key: S,
    pub direction: SortDirection,
}

impl<S: SortKey> Sort<S> {
    pub fn new(key: S, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Parses the `column[,direction]` form used by the `sort` query parameter.
    pub fn parse(spec: &str) -> Result<Self, PageRequestError> {
        let mut parts = spec.splitn(2, ',');
        let column = parts.next().unwrap_or_default().trim();
        let key = S::from_column(column)
            .ok_or_else(|| PageRequestError::UnknownSortColumn(column.to_string()))?;
        let direction = match parts.next() {
            Some(direction) => SortDirection::parse(direction)?,
            None => SortDirection::Asc,
        };
        Ok(Self { key, direction })
    }
}

impl<S: SortKey> Display for Sort<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.key.column(), self.direction)
    }
}

/// Validated pagination window: 0-based page index, page size and ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest<S> {
    page: usize,
    size: usize,
    sort: Sort<S>,
}

impl<S: SortKey> PageRequest<S> {
    pub fn new(page: i64, size: i64, sort: Sort<S>) -> Result<Self, PageRequestError> {
        if page < 0 {
            return Err(PageRequestError::NegativePage(page));
        }
        if size <= 0 {
            return Err(PageRequestError::NonPositiveSize(size));
        }
        if size > MAX_PAGE_SIZE as i64 {
            return Err(PageRequestError::SizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        if page.checked_mul(size).is_none() {
            return Err(PageRequestError::OffsetOverflow { page, size });
        }
        Ok(Self {
            page: page as usize,
            size: size as usize,
            sort,
        })
    }

    /// First page with the given size, default sort.
    pub fn first(size: i64) -> Result<Self, PageRequestError> {
        Self::new(0, size, Sort::default())
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> Sort<S> {
        self.sort
    }

    /// Row offset of the window; `new` guarantees it fits in `i64`.
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

/// Items of one window together with the number of rows matching the filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn total_pages(&self, size: usize) -> usize {
        if size == 0 { 0 } else { self.total.div_ceil(size) }
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Template-facing page: the items plus everything needed to draw page links.
///
/// Page numbers are 1-based for display; `None` marks a gap. Links are built
/// by the template as `?{query}&page={number - 1}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub query: String,
}

impl<T> Paginated<T> {
    pub fn new<S: SortKey>(page: Page<T>, request: &PageRequest<S>, query: String) -> Self {
        let total_pages = page.total_pages(request.size());
        let current_page = request.page() + 1;
        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items: page.items,
            pages,
            page: current_page,
            size: request.size(),
            total: page.total,
            total_pages,
            query,
        }
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    enum Column {
        #[default]
        Id,
        Name,
    }

    impl SortKey for Column {
        fn from_column(name: &str) -> Option<Self> {
            match name {
                "id" => Some(Column::Id),
                "name" => Some(Column::Name),
                _ => None,
            }
        }

        fn column(self) -> &'static str {
            match self {
                Column::Id => "id",
                Column::Name => "name",
            }
        }
    }

    #[test]
    fn request_translates_page_to_offset() {
        let request = PageRequest::<Column>::new(2, 7, Sort::default()).unwrap();
        assert_eq!(request.offset(), 14);
        assert_eq!(request.limit(), 7);
    }

    #[test]
    fn request_rejects_invalid_windows() {
        assert_eq!(
            PageRequest::<Column>::new(-1, 7, Sort::default()),
            Err(PageRequestError::NegativePage(-1))
        );
        assert_eq!(
            PageRequest::<Column>::new(0, 0, Sort::default()),
            Err(PageRequestError::NonPositiveSize(0))
        );
        assert_eq!(
            PageRequest::<Column>::first(-5),
            Err(PageRequestError::NonPositiveSize(-5))
        );
        assert!(matches!(
            PageRequest::<Column>::new(0, 1000, Sort::default()),
            Err(PageRequestError::SizeTooLarge { size: 1000, .. })
        ));
    }

    #[test]
    fn request_rejects_offsets_past_i64() {
        assert_eq!(
            PageRequest::<Column>::new(i64::MAX, 7, Sort::default()),
            Err(PageRequestError::OffsetOverflow {
                page: i64::MAX,
                size: 7
            })
        );

        let last = PageRequest::<Column>::new(i64::MAX / 7, 7, Sort::default()).unwrap();
        assert_eq!(last.offset(), (i64::MAX / 7) * 7);

        let view = Paginated::new(Page::<i32>::new(vec![], 3), &last, String::new());
        assert!(view.items.is_empty());
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn sort_parses_column_and_direction() {
        let sort = Sort::<Column>::parse("name,DESC").unwrap();
        assert_eq!(sort, Sort::new(Column::Name, SortDirection::Desc));
        assert_eq!(sort.to_string(), "name,desc");

        let sort = Sort::<Column>::parse("id").unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_rejects_unknown_names() {
        assert_eq!(
            Sort::<Column>::parse("password,asc"),
            Err(PageRequestError::UnknownSortColumn("password".into()))
        );
        assert_eq!(
            Sort::<Column>::parse("id,sideways"),
            Err(PageRequestError::UnknownSortDirection("sideways".into()))
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 15);
        assert_eq!(page.total_pages(7), 3);
        assert_eq!(Page::<i32>::new(vec![], 0).total_pages(7), 0);
    }

    #[test]
    fn page_links_collapse_long_ranges() {
        assert_eq!(get_pages(3, 1, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn paginated_reports_one_based_position() {
        let request = PageRequest::<Column>::new(1, 2, Sort::default()).unwrap();
        let view = Paginated::new(Page::new(vec!["c", "d"], 5), &request, "nome=a".into());
        assert_eq!(view.page, 2);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.pages, vec![Some(1), Some(2), Some(3)]);
        assert!(!view.is_first());
        assert!(!view.is_last());
    }
}

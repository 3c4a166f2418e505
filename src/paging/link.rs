use serde::Serialize;

/// One entry of a pagination widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNumberLink {
    pub page_number: usize,
    pub current: bool,
    pub href: String,
}

pub(crate) fn build_links<F>(
    page_number_list: &[usize],
    current_page_number: usize,
    mut href_builder: F,
) -> Vec<PageNumberLink>
where
    F: FnMut(usize) -> String,
{
    page_number_list
        .iter()
        .map(|&page_number| PageNumberLink {
            page_number,
            current: page_number == current_page_number,
            href: href_builder(page_number),
        })
        .collect()
}

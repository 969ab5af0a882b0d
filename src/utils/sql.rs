use sea_orm::Order;
use sea_orm::sea_query::{BinOper, Expr, ExprTrait, Func, IntoColumnRef};

const LIKE_ESCAPE: char = '!';

/// 转义 LIKE 模式中的通配符（`!` 为转义字符）
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '!' | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// 不区分大小写的子串匹配：`UPPER(col) LIKE UPPER('%term%') ESCAPE '!'`
///
/// 两侧都在数据库内转大写，通配符按字面匹配。
pub fn icontains<C: IntoColumnRef>(column: C, term: &str) -> Expr {
    let pattern = Expr::Binary(
        Box::new(Func::upper(Expr::val(format!("%{}%", escape_like_pattern(term)))).into()),
        BinOper::Escape,
        Box::new(Expr::Constant(LIKE_ESCAPE.into())),
    );
    Expr::expr(Func::upper(Expr::col(column))).binary(BinOper::Like, pattern)
}

/// 拆分搜索参数：按空白或逗号分隔，忽略空词
pub fn search_terms(search: Option<&str>) -> Vec<String> {
    search
        .map(|s| {
            s.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// 解析排序参数
///
/// 逗号分隔，`-` 前缀表示降序；只保留 `allowed` 中的字段，未知字段静默忽略。
pub fn parse_ordering<'a>(
    ordering: Option<&str>,
    allowed: &[&'a str],
) -> Vec<(&'a str, SortDirection)> {
    let Some(ordering) = ordering else {
        return Vec::new();
    };

    ordering
        .split(',')
        .map(str::trim)
        .filter_map(|term| {
            let (name, direction) = match term.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (term, SortDirection::Asc),
            };
            allowed
                .iter()
                .find(|field| **field == name)
                .map(|field| (*field, direction))
        })
        .collect()
}

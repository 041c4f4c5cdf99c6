use std::fmt::Display;
use itertools::Itertools;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') { 
        format!("({s})")
    } else { 
        s
    }
}

/// Formats `Σ rᵢ xᵢ` as `r₀x₀ + r₁x₁ - ...`, omitting unit coefficients.
pub fn lc<X, R, S>(terms: S) -> String
where 
    X: Display, 
    R: Display, 
    S: Iterator<Item = (X, R)>
{ 
    let mut res: Vec<String> = vec![];
    
    for (k, (x, r)) in terms.enumerate() {
        let r = paren_expr(r);
        let x = x.to_string();

        let (op, r) = match r.strip_prefix('-') { 
            Some(r) if k > 0 => ("-", r.to_owned()),
            _ => ("+", r)
        };

        let term = if r == "1" { 
            x
        } else if r == "-1" { 
            format!("-{x}")
        } else if x == "1" { 
            r
        } else { 
            format!("{r}{x}")
        };

        if k > 0 { 
            res.push(op.to_string());
        }
        res.push(term);
    }

    if res.is_empty() { 
        String::from("0")
    } else { 
        res.join(" ")
    }
}

fn script(i: isize, digits: [char; 10], minus: char) -> String { 
    let mut res = String::new();
    if i < 0 { 
        res.push(minus);
    }
    for c in i.unsigned_abs().to_string().chars() { 
        let d = c as usize - '0' as usize;
        res.push(digits[d]);
    }
    res
}

pub fn subscript(i: isize) -> String {
    script(i, ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'], '₋')
}

pub fn superscript(i: isize) -> String {
    script(i, ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'], '⁻')
}

pub fn table<S, I, J, I1, I2, D, F>(head: S, rows: I1, cols: I2, entry: F) -> String
where 
    S: Display,
    I: Display,
    J: Display,
    I1: Iterator<Item = I>,
    I2: Iterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    use prettytable::*;

    let rows = rows.collect_vec();
    let cols = cols.collect_vec();

    fn row<I>(head: String, cols: I) -> Row
    where I: Iterator<Item = String> { 
        let mut cells = vec![Cell::new(head.as_str())];
        cells.extend(cols.map(|str| Cell::new(str.as_str())));
        Row::new(cells)
    }

    let mut table = Table::new();

    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row(
        head.to_string(),
        cols.iter().map(|j| j.to_string() )
    ));

    for i in rows.iter() { 
        table.add_row(row(
            i.to_string(),
            cols.iter().map(|j| entry(i, j).to_string())
        ));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscript() { 
        assert_eq!(subscript(0), "₀");
        assert_eq!(subscript(1234567890), "₁₂₃₄₅₆₇₈₉₀");
        assert_eq!(subscript(-12), "₋₁₂");
    }

    #[test]
    fn test_superscript() { 
        assert_eq!(superscript(0), "⁰");
        assert_eq!(superscript(1234567890), "¹²³⁴⁵⁶⁷⁸⁹⁰");
        assert_eq!(superscript(-3), "⁻³");
    }

    #[test]
    fn test_lc() { 
        let terms = [("x", 1), ("y", -1), ("z", 2), ("1", -3)];
        assert_eq!(lc(terms.into_iter()), "x - y + 2z - 3");

        let terms = [("x", -1), ("y", 1)];
        assert_eq!(lc(terms.into_iter()), "-x + y");

        let terms: [(&str, i32); 0] = [];
        assert_eq!(lc(terms.into_iter()), "0");
    }

    #[test]
    fn test_paren_expr() { 
        assert_eq!(paren_expr("x + 1"), "(x + 1)");
        assert_eq!(paren_expr("-2"), "-2");
    }

    #[test]
    fn test_table() { 
        let table = table("", 1..=3, 4..=6, |i, j| i * 10 + j);
        let a = "    4   5   6 \n 1  14  15  16 \n 2  24  25  26 \n 3  34  35  36 \n";
        assert_eq!(table, a.to_string());
    }
}

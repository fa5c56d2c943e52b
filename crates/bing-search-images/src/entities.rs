// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTML 4.01 named character entities, sorted by code point.

/// Entity name for `c`, if HTML 4.01 defines one.
pub(crate) fn entity_name(c: char) -> Option<&'static str> {
	ENTITIES
		.binary_search_by_key(&c, |&(ch, _)| ch)
		.ok()
		.map(|i| ENTITIES[i].1)
}

static ENTITIES: &[(char, &str)] = &[
	('\u{0022}', "quot"),
	('\u{0026}', "amp"),
	('\u{003c}', "lt"),
	('\u{003e}', "gt"),
	('\u{00a0}', "nbsp"),
	('\u{00a1}', "iexcl"),
	('\u{00a2}', "cent"),
	('\u{00a3}', "pound"),
	('\u{00a4}', "curren"),
	('\u{00a5}', "yen"),
	('\u{00a6}', "brvbar"),
	('\u{00a7}', "sect"),
	('\u{00a8}', "uml"),
	('\u{00a9}', "copy"),
	('\u{00aa}', "ordf"),
	('\u{00ab}', "laquo"),
	('\u{00ac}', "not"),
	('\u{00ad}', "shy"),
	('\u{00ae}', "reg"),
	('\u{00af}', "macr"),
	('\u{00b0}', "deg"),
	('\u{00b1}', "plusmn"),
	('\u{00b2}', "sup2"),
	('\u{00b3}', "sup3"),
	('\u{00b4}', "acute"),
	('\u{00b5}', "micro"),
	('\u{00b6}', "para"),
	('\u{00b7}', "middot"),
	('\u{00b8}', "cedil"),
	('\u{00b9}', "sup1"),
	('\u{00ba}', "ordm"),
	('\u{00bb}', "raquo"),
	('\u{00bc}', "frac14"),
	('\u{00bd}', "frac12"),
	('\u{00be}', "frac34"),
	('\u{00bf}', "iquest"),
	('\u{00c0}', "Agrave"),
	('\u{00c1}', "Aacute"),
	('\u{00c2}', "Acirc"),
	('\u{00c3}', "Atilde"),
	('\u{00c4}', "Auml"),
	('\u{00c5}', "Aring"),
	('\u{00c6}', "AElig"),
	('\u{00c7}', "Ccedil"),
	('\u{00c8}', "Egrave"),
	('\u{00c9}', "Eacute"),
	('\u{00ca}', "Ecirc"),
	('\u{00cb}', "Euml"),
	('\u{00cc}', "Igrave"),
	('\u{00cd}', "Iacute"),
	('\u{00ce}', "Icirc"),
	('\u{00cf}', "Iuml"),
	('\u{00d0}', "ETH"),
	('\u{00d1}', "Ntilde"),
	('\u{00d2}', "Ograve"),
	('\u{00d3}', "Oacute"),
	('\u{00d4}', "Ocirc"),
	('\u{00d5}', "Otilde"),
	('\u{00d6}', "Ouml"),
	('\u{00d7}', "times"),
	('\u{00d8}', "Oslash"),
	('\u{00d9}', "Ugrave"),
	('\u{00da}', "Uacute"),
	('\u{00db}', "Ucirc"),
	('\u{00dc}', "Uuml"),
	('\u{00dd}', "Yacute"),
	('\u{00de}', "THORN"),
	('\u{00df}', "szlig"),
	('\u{00e0}', "agrave"),
	('\u{00e1}', "aacute"),
	('\u{00e2}', "acirc"),
	('\u{00e3}', "atilde"),
	('\u{00e4}', "auml"),
	('\u{00e5}', "aring"),
	('\u{00e6}', "aelig"),
	('\u{00e7}', "ccedil"),
	('\u{00e8}', "egrave"),
	('\u{00e9}', "eacute"),
	('\u{00ea}', "ecirc"),
	('\u{00eb}', "euml"),
	('\u{00ec}', "igrave"),
	('\u{00ed}', "iacute"),
	('\u{00ee}', "icirc"),
	('\u{00ef}', "iuml"),
	('\u{00f0}', "eth"),
	('\u{00f1}', "ntilde"),
	('\u{00f2}', "ograve"),
	('\u{00f3}', "oacute"),
	('\u{00f4}', "ocirc"),
	('\u{00f5}', "otilde"),
	('\u{00f6}', "ouml"),
	('\u{00f7}', "divide"),
	('\u{00f8}', "oslash"),
	('\u{00f9}', "ugrave"),
	('\u{00fa}', "uacute"),
	('\u{00fb}', "ucirc"),
	('\u{00fc}', "uuml"),
	('\u{00fd}', "yacute"),
	('\u{00fe}', "thorn"),
	('\u{00ff}', "yuml"),
	('\u{0152}', "OElig"),
	('\u{0153}', "oelig"),
	('\u{0160}', "Scaron"),
	('\u{0161}', "scaron"),
	('\u{0178}', "Yuml"),
	('\u{0192}', "fnof"),
	('\u{02c6}', "circ"),
	('\u{02dc}', "tilde"),
	('\u{0391}', "Alpha"),
	('\u{0392}', "Beta"),
	('\u{0393}', "Gamma"),
	('\u{0394}', "Delta"),
	('\u{0395}', "Epsilon"),
	('\u{0396}', "Zeta"),
	('\u{0397}', "Eta"),
	('\u{0398}', "Theta"),
	('\u{0399}', "Iota"),
	('\u{039a}', "Kappa"),
	('\u{039b}', "Lambda"),
	('\u{039c}', "Mu"),
	('\u{039d}', "Nu"),
	('\u{039e}', "Xi"),
	('\u{039f}', "Omicron"),
	('\u{03a0}', "Pi"),
	('\u{03a1}', "Rho"),
	('\u{03a3}', "Sigma"),
	('\u{03a4}', "Tau"),
	('\u{03a5}', "Upsilon"),
	('\u{03a6}', "Phi"),
	('\u{03a7}', "Chi"),
	('\u{03a8}', "Psi"),
	('\u{03a9}', "Omega"),
	('\u{03b1}', "alpha"),
	('\u{03b2}', "beta"),
	('\u{03b3}', "gamma"),
	('\u{03b4}', "delta"),
	('\u{03b5}', "epsilon"),
	('\u{03b6}', "zeta"),
	('\u{03b7}', "eta"),
	('\u{03b8}', "theta"),
	('\u{03b9}', "iota"),
	('\u{03ba}', "kappa"),
	('\u{03bb}', "lambda"),
	('\u{03bc}', "mu"),
	('\u{03bd}', "nu"),
	('\u{03be}', "xi"),
	('\u{03bf}', "omicron"),
	('\u{03c0}', "pi"),
	('\u{03c1}', "rho"),
	('\u{03c2}', "sigmaf"),
	('\u{03c3}', "sigma"),
	('\u{03c4}', "tau"),
	('\u{03c5}', "upsilon"),
	('\u{03c6}', "phi"),
	('\u{03c7}', "chi"),
	('\u{03c8}', "psi"),
	('\u{03c9}', "omega"),
	('\u{03d1}', "thetasym"),
	('\u{03d2}', "upsih"),
	('\u{03d6}', "piv"),
	('\u{2002}', "ensp"),
	('\u{2003}', "emsp"),
	('\u{2009}', "thinsp"),
	('\u{200c}', "zwnj"),
	('\u{200d}', "zwj"),
	('\u{200e}', "lrm"),
	('\u{200f}', "rlm"),
	('\u{2013}', "ndash"),
	('\u{2014}', "mdash"),
	('\u{2018}', "lsquo"),
	('\u{2019}', "rsquo"),
	('\u{201a}', "sbquo"),
	('\u{201c}', "ldquo"),
	('\u{201d}', "rdquo"),
	('\u{201e}', "bdquo"),
	('\u{2020}', "dagger"),
	('\u{2021}', "Dagger"),
	('\u{2022}', "bull"),
	('\u{2026}', "hellip"),
	('\u{2030}', "permil"),
	('\u{2032}', "prime"),
	('\u{2033}', "Prime"),
	('\u{2039}', "lsaquo"),
	('\u{203a}', "rsaquo"),
	('\u{203e}', "oline"),
	('\u{2044}', "frasl"),
	('\u{20ac}', "euro"),
	('\u{2111}', "image"),
	('\u{2118}', "weierp"),
	('\u{211c}', "real"),
	('\u{2122}', "trade"),
	('\u{2135}', "alefsym"),
	('\u{2190}', "larr"),
	('\u{2191}', "uarr"),
	('\u{2192}', "rarr"),
	('\u{2193}', "darr"),
	('\u{2194}', "harr"),
	('\u{21b5}', "crarr"),
	('\u{21d0}', "lArr"),
	('\u{21d1}', "uArr"),
	('\u{21d2}', "rArr"),
	('\u{21d3}', "dArr"),
	('\u{21d4}', "hArr"),
	('\u{2200}', "forall"),
	('\u{2202}', "part"),
	('\u{2203}', "exist"),
	('\u{2205}', "empty"),
	('\u{2207}', "nabla"),
	('\u{2208}', "isin"),
	('\u{2209}', "notin"),
	('\u{220b}', "ni"),
	('\u{220f}', "prod"),
	('\u{2211}', "sum"),
	('\u{2212}', "minus"),
	('\u{2217}', "lowast"),
	('\u{221a}', "radic"),
	('\u{221d}', "prop"),
	('\u{221e}', "infin"),
	('\u{2220}', "ang"),
	('\u{2227}', "and"),
	('\u{2228}', "or"),
	('\u{2229}', "cap"),
	('\u{222a}', "cup"),
	('\u{222b}', "int"),
	('\u{2234}', "there4"),
	('\u{223c}', "sim"),
	('\u{2245}', "cong"),
	('\u{2248}', "asymp"),
	('\u{2260}', "ne"),
	('\u{2261}', "equiv"),
	('\u{2264}', "le"),
	('\u{2265}', "ge"),
	('\u{2282}', "sub"),
	('\u{2283}', "sup"),
	('\u{2284}', "nsub"),
	('\u{2286}', "sube"),
	('\u{2287}', "supe"),
	('\u{2295}', "oplus"),
	('\u{2297}', "otimes"),
	('\u{22a5}', "perp"),
	('\u{22c5}', "sdot"),
	('\u{2308}', "lceil"),
	('\u{2309}', "rceil"),
	('\u{230a}', "lfloor"),
	('\u{230b}', "rfloor"),
	('\u{2329}', "lang"),
	('\u{232a}', "rang"),
	('\u{25ca}', "loz"),
	('\u{2660}', "spades"),
	('\u{2663}', "clubs"),
	('\u{2665}', "hearts"),
	('\u{2666}', "diams"),
];

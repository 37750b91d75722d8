//! Usage text shown for `/help`, `/?`, no arguments or a missing filename.

/// Full help text, one entry per line.
pub fn usage_text() -> String {
    let lines = [
        "",
        "delete-file-line removes the header, the footer and/or the first column of a delimited text file.",
        "",
        "Usage of this program:",
        "",
        "List of arguments:",
        "",
        "/help (this help)",
        "/? (this help)",
        "",
        "You can write argument name (not its value) in uppercase or lowercase or a mix of them (case insensitive)",
        "/filename is the same as /FileName or /fileName",
        "",
        "/fileName:<name of the file to be processed>",
        "/separator:<the CSV separator> semicolon (;) is the default separator",
        "/hasHeader:<true or false> false by default",
        "/hasFooter:<true or false> false by default",
        "/deleteHeader:<true or false> false by default",
        "/deleteFooter:<true or false> false by default",
        "/deleteFirstColumn:<true or false> false by default",
        "/sameName:<true or false> true by default",
        "/newName:<new name of the file which has been processed>",
        "/log:<true or false> false by default",
        "/removeEmptyLine:<true or false> true by default",
        "",
        "A line of the form 9;<count> is read as the number of records the file holds.",
        "",
        "Options (they must come before the first /key:value argument):",
        "",
        "--log-file <NAME>  base name of the activity log, the date is added to it",
        "-C, --directory <DIR>  directory the file names are resolved against",
        "",
        "Examples:",
        "",
        "delete-file-line /filename:MyCSVFile.txt /separator:, /hasheader:true /hasfooter:true /deleteheader:true /deletefooter:true /deletefirstcolumn:true /log:true",
        "",
        "delete-file-line /help (this help)",
        "delete-file-line /? (this help)",
        "",
    ];
    lines.join("\n")
}

lib::entry!(input = "d04.txt", y2023::d04::solve);

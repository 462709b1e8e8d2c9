lib::entry!(input = "d03.txt", y2023::d03::solve);
